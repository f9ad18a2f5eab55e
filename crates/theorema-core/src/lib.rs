//! Theorema Core Library
//!
//! Flexible document schema, HTML renderer, content loader and cache.
//! No async runtime; IO goes through the `ContentSource` trait.
//!

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod source;
pub mod state;
pub mod tree;
pub mod utils;

pub use cache::ContentCache;
pub use config::TheoremaConfig;
pub use error::{ContentError, Result};
pub use loader::{ContentLoader, LoadOutcome, Provenance, SearchHit};
pub use model::{FlexibleDocument, MathContent};
pub use render::{ComponentRenderer, Renderer};
pub use source::{ContentSource, FetchResponse, MemorySource, StaticDirSource};
pub use state::ViewState;
pub use tree::{ContentTree, FolderNode};
pub use utils::{normalize_theory_path, slugify_heading, slugify_identifier, title_case};
