use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ContentError, Result};
use crate::source::{normalize_request_path, ContentSource};
use crate::utils::time;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CachedBody {
    pub body: String,
    pub digest: String,
    pub fetched_at: u64,
}

impl CachedBody {
    pub fn new(body: String) -> Self {
        let digest = format!("{:x}", Sha256::digest(body.as_bytes()));
        Self {
            body,
            digest,
            fetched_at: time::now(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CacheSnapshot {
    version: u32,
    entries: HashMap<String, CachedBody>,
}

/// Process-wide map from request path to the JSON body fetched there.
///
/// Lifecycle is explicit: `populate` warms it, `invalidate`/`clear` drop
/// entries, `refresh` re-fetches everything held. Writes go through an
/// interior lock so one loader can be shared across runtime threads.
#[derive(Default)]
pub struct ContentCache {
    entries: RwLock<HashMap<String, CachedBody>>,
}

impl ContentCache {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<CachedBody> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&normalize_request_path(path)).cloned()
    }

    pub fn insert(&self, path: &str, body: String) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(normalize_request_path(path), CachedBody::new(body));
    }

    pub fn invalidate(&self, path: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&normalize_request_path(path)).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted list of cached paths.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Fetch each path once and keep the JSON successes. Returns how many were stored.
    pub fn populate(&self, source: &dyn ContentSource, paths: &[String]) -> usize {
        let mut stored = 0;
        for path in paths {
            let response = source.fetch(path);
            if response.is_ok() && response.is_json() {
                self.insert(path, response.body);
                stored += 1;
            } else {
                debug!("Cache populate skipped {} (HTTP {})", path, response.status);
            }
        }
        info!("Cache populated with {}/{} paths", stored, paths.len());
        stored
    }

    /// Re-fetch every cached path. Entries that no longer resolve are dropped.
    /// Returns the paths whose digest changed or that were dropped.
    pub fn refresh(&self, source: &dyn ContentSource) -> Vec<String> {
        let mut changed = Vec::new();
        for path in self.keys() {
            let response = source.fetch(&path);
            if response.is_ok() && response.is_json() {
                let fresh = CachedBody::new(response.body);
                let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
                let differs = entries
                    .get(&path)
                    .map(|old| old.digest != fresh.digest)
                    .unwrap_or(true);
                if differs {
                    changed.push(path.clone());
                }
                entries.insert(path, fresh);
            } else {
                self.invalidate(&path);
                changed.push(path);
            }
        }
        changed
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = CacheSnapshot {
            version: Self::CURRENT_VERSION,
            entries: self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };
        let buffer = bincode::serialize(&snapshot)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buffer)?;
        Ok(())
    }

    /// Replace the current entries with a saved snapshot.
    pub fn load(&self, path: &Path) -> Result<usize> {
        let buffer = std::fs::read(path)?;
        let snapshot: CacheSnapshot = bincode::deserialize(&buffer)?;

        if snapshot.version != Self::CURRENT_VERSION {
            return Err(ContentError::SnapshotVersion {
                found: snapshot.version,
                expected: Self::CURRENT_VERSION,
            });
        }

        let count = snapshot.entries.len();
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = snapshot.entries;
        Ok(count)
    }
}
