mod pages;
mod search;

pub use pages::*;
pub use search::*;
