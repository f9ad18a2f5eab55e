//! Flexible document schema.
//!
//! Every entity is an immutable value tree built once from a JSON payload.
//! Tagged unions use adjacent tagging (`{"type": ..., "content": ...}`); an
//! unrecognised tag is kept as [`UnknownVariant`] so one bad node does not
//! reject the whole document.

use serde::{Deserialize, Serialize};

mod content;
mod document;
mod layout;
mod legacy;
mod rich_text;

pub use content::*;
pub use document::*;
pub use layout::*;
pub use legacy::*;
pub use rich_text::*;

/// A tagged value whose tag this version does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnknownVariant {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl UnknownVariant {
    pub fn display_name(&self) -> &str {
        if self.type_name.is_empty() {
            "(untyped)"
        } else {
            &self.type_name
        }
    }
}
