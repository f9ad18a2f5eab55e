use thiserror::Error;

/// Failures inside the content layer.
///
/// None of these reach a page: the loader turns them into placeholders and
/// the renderer never fails. They exist so strategies can short-circuit and
/// so diagnostics can say why a candidate was skipped.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Fetch failed for {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Expected JSON at {path}, got content type '{content_type}'")]
    NotJson { path: String, content_type: String },

    #[error("Malformed JSON at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Theory '{0}' lists no definitions or theorems")]
    EmptyTheory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Cache snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Incompatible cache snapshot version {found} (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, ContentError>;
