use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::LayoutStyle;

/// Top-level configuration for Theorema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TheoremaConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where static content lives and how to probe for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory serving the static files
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Request path of the theory manifest
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    /// Base directories probed for theory files, in order
    #[serde(default = "default_theory_bases")]
    pub theory_bases: Vec<String>,
    /// Base directories probed for flexible documents, in order
    #[serde(default = "default_document_bases")]
    pub document_bases: Vec<String>,
    /// Paths skipped by discovery (glob syntax)
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

/// Rendering limits and defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Nesting depth past which content is replaced by a marker
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Render a visible marker for unrecognised content types
    #[serde(default = "default_true")]
    pub show_unknown_markers: bool,
    /// Layout used when a document carries no presentation config
    #[serde(default = "default_layout")]
    pub default_layout: LayoutStyle,
}

/// Content cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Where the bincode snapshot is read from and written to
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Logging and telemetery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Whether to log load statistics on startup
    #[serde(default = "default_true")]
    pub show_load_stats: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("public")
}

fn default_manifest_path() -> String {
    "/manifest.json".to_string()
}

fn default_theory_bases() -> Vec<String> {
    vec![
        "/subjects/math/theories".to_string(),
        "/theories".to_string(),
        "/content/theories".to_string(),
        "/data/theories".to_string(),
    ]
}

fn default_document_bases() -> Vec<String> {
    vec![
        "/documents".to_string(),
        "/subjects/math/documents".to_string(),
        "/content/documents".to_string(),
    ]
}

fn default_ignore_patterns() -> Vec<String> {
    vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()]
}

fn default_max_depth() -> usize {
    32
}

fn default_layout() -> LayoutStyle {
    LayoutStyle::SingleColumn
}

fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest_path: default_manifest_path(),
            theory_bases: default_theory_bases(),
            document_bases: default_document_bases(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            show_unknown_markers: true,
            default_layout: default_layout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_load_stats: true,
        }
    }
}

impl TheoremaConfig {
    /// Load config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = TheoremaConfig::from_yaml(
            "content:\n  root: site\nrender:\n  max_depth: 4\nlogging:\n  level: debug\n",
        )
        .unwrap();
        assert_eq!(config.content.root, PathBuf::from("site"));
        assert_eq!(config.content.manifest_path, "/manifest.json");
        assert_eq!(config.content.theory_bases.len(), 4);
        assert_eq!(config.render.max_depth, 4);
        assert!(config.render.show_unknown_markers);
        assert!(config.cache.enabled);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_yaml_roundtrip_keeps_layout() {
        let mut config = TheoremaConfig::default();
        config.render.default_layout = LayoutStyle::TwoColumn;
        let yaml = config.to_yaml().unwrap();
        let back = TheoremaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back.render.default_layout, LayoutStyle::TwoColumn);
    }
}
