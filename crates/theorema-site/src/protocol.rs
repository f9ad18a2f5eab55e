use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitKind {
    Definition,
    Theorem,
}

/// One search match, flattened for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitSummary {
    pub kind: HitKind,
    /// Theory display name
    pub theory: String,
    pub name: String,
    /// Site link to the entry's anchor
    pub href: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    pub hits: Vec<HitSummary>,
}

/// Page metadata without the body, for listings and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub path: String,
    pub status: u16,
    pub title: String,
    pub bytes: usize,
}
