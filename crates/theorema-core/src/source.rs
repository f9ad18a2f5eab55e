use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use walkdir::WalkDir;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Answer to a single fetch, shaped like an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl FetchResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::error(404)
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .split(';')
            .next()
            .map(|mime| mime.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
            .unwrap_or(false)
    }
}

/// Abstract interface for static content retrieval.
pub trait ContentSource: Send + Sync {
    /// Fetch one URL-style path (`/subjects/math/...`). Never retried by callers.
    fn fetch(&self, path: &str) -> FetchResponse;

    /// List all files with the given extension under `prefix`, as URL-style paths.
    /// This should be a recursive search.
    fn list_files(&self, prefix: &str, extension: &str) -> Vec<String>;
}

/// Serves a directory the way a static file server would.
pub struct StaticDirSource {
    root: PathBuf,
}

impl StaticDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request path onto the root, refusing anything that climbs out of it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

impl ContentSource for StaticDirSource {
    fn fetch(&self, path: &str) -> FetchResponse {
        let Some(file) = self.resolve(path) else {
            return FetchResponse::error(403);
        };
        if !file.is_file() {
            return FetchResponse::not_found();
        }
        match std::fs::read_to_string(&file) {
            Ok(body) => {
                let is_json = file.extension().map(|ext| ext == "json").unwrap_or(false);
                FetchResponse {
                    status: 200,
                    content_type: if is_json {
                        JSON_CONTENT_TYPE.to_string()
                    } else {
                        "text/plain".to_string()
                    },
                    body,
                }
            }
            Err(_) => FetchResponse::error(500),
        }
    }

    fn list_files(&self, prefix: &str, extension: &str) -> Vec<String> {
        let Some(start) = self.resolve(prefix) else {
            return Vec::new();
        };
        let mut files = Vec::new();

        for entry in WalkDir::new(&start)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.extension().map(|ext| ext == extension).unwrap_or(false) {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    let url = relative
                        .components()
                        .map(|part| part.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    files.push(format!("/{url}"));
                }
            }
        }

        files
    }
}

/// In-memory source, keyed by request path.
#[derive(Default)]
pub struct MemorySource {
    files: RwLock<BTreeMap<String, FetchResponse>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, path: &str, body: impl Into<String>) -> Self {
        self.insert(path, FetchResponse::json(body));
        self
    }

    pub fn insert(&self, path: &str, response: FetchResponse) {
        let mut files = self
            .files
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        files.insert(normalize_request_path(path), response);
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, path: &str) -> FetchResponse {
        let files = self
            .files
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        files
            .get(&normalize_request_path(path))
            .cloned()
            .unwrap_or_else(FetchResponse::not_found)
    }

    fn list_files(&self, prefix: &str, extension: &str) -> Vec<String> {
        let prefix = normalize_request_path(prefix);
        let suffix = format!(".{extension}");
        let files = self
            .files
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        files
            .keys()
            .filter(|path| path.starts_with(&prefix) && path.ends_with(&suffix))
            .cloned()
            .collect()
    }
}

/// `a//b/` and `a/b` address the same file; paths always start with `/`.
pub fn normalize_request_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
    format!("/{}", parts.join("/"))
}
