//! Theorema Site Library
//!
//! Routing shell over the core crate: maps site paths to rendered pages.
//! Loader calls are blocking and run on the tokio blocking pool.

pub mod conversion;
pub mod handlers;
pub mod protocol;
pub mod routes;
mod state;

#[cfg(test)]
mod tests;

pub use handlers::{handle_route, search_all_categories, Page};
pub use routes::Route;
pub use state::SiteState;
