//! Content access: resolves theory and document identifiers to parsed values.
//!
//! Every public load succeeds. Failures are absorbed into placeholder values
//! and reported through [`Provenance`] so callers and tests can tell genuine
//! content from degraded content.

use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;

use crate::cache::ContentCache;
use crate::config::TheoremaConfig;
use crate::error::{ContentError, Result};
use crate::model::Manifest;
use crate::source::ContentSource;

mod document;
mod probe;
mod theory;


pub use probe::{document_candidates, theory_candidates, TheoryFile};
pub use theory::{search_content, SearchHit, NOT_FOUND_SUFFIX};

/// How a loaded value came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Parsed from these paths.
    Loaded { paths: Vec<String> },
    /// Synthesized because candidates existed but none could be used.
    Placeholder { reason: String },
    /// Synthesized because no candidate resolved.
    NotFound { tried: Vec<String> },
}

impl Provenance {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loaded { .. } => "loaded",
            Self::Placeholder { .. } => "placeholder",
            Self::NotFound { .. } => "not-found",
        }
    }
}

/// A value that is always renderable, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> LoadOutcome<T> {
    pub fn loaded(value: T, paths: Vec<String>) -> Self {
        Self {
            value,
            provenance: Provenance::Loaded { paths },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadOutcome<U> {
        LoadOutcome {
            value: f(self.value),
            provenance: self.provenance,
        }
    }
}

pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    cache: ContentCache,
    config: TheoremaConfig,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>, config: TheoremaConfig) -> Self {
        Self {
            source,
            cache: ContentCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &TheoremaConfig {
        &self.config
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn source(&self) -> &dyn ContentSource {
        &*self.source
    }

    /// One attempt at one path: non-OK status or a non-JSON content type is
    /// an error. Successful bodies are cached when caching is enabled.
    pub fn fetch_json(&self, path: &str) -> Result<Value> {
        if self.config.cache.enabled {
            if let Some(cached) = self.cache.get(path) {
                debug!("Cache hit for {}", path);
                return parse_body(path, &cached.body);
            }
        }

        debug!("Fetching {}", path);
        let response = self.source.fetch(path);
        if !response.is_ok() {
            return Err(ContentError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }
        if !response.is_json() {
            return Err(ContentError::NotJson {
                path: path.to_string(),
                content_type: response.content_type,
            });
        }

        let value = parse_body(path, &response.body)?;
        if self.config.cache.enabled {
            self.cache.insert(path, response.body);
        }
        Ok(value)
    }

    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.config.content.manifest_path.clone();
        let value = self.fetch_json(&path)?;
        serde_json::from_value(value).map_err(|source| ContentError::Parse { path, source })
    }

    /// Warm the cache with the manifest and every file it lists.
    pub fn warm_cache(&self) -> usize {
        let mut paths = vec![self.config.content.manifest_path.clone()];
        if let Ok(manifest) = self.load_manifest() {
            for theory in &manifest.theories {
                for file in &theory.files {
                    paths.push(self.resolve_manifest_file(&theory.theory_id, &file.file_path));
                }
            }
        }
        let stored = self.cache.populate(&*self.source, &paths);
        if self.config.logging.show_load_stats {
            info!("Warmed cache: {} entries", stored);
        }
        stored
    }

    /// Re-fetch everything cached; returns the paths that changed.
    pub fn refresh_cache(&self) -> Vec<String> {
        self.cache.refresh(&*self.source)
    }
}

fn parse_body(path: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| ContentError::Parse {
        path: path.to_string(),
        source,
    })
}
