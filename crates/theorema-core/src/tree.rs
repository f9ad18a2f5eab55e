use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Manifest;

/// A node of the navigation tree. Folders without a backing file are virtual
/// and carry no `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    pub name: String,
    pub path: Option<String>,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn is_virtual(&self) -> bool {
        self.path.is_none()
    }
}

/// Navigation tree built from discovered content paths or the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContentTree {
    pub roots: Vec<FolderNode>,
}

/// Intermediate form keyed by segment so insertion order does not matter.
#[derive(Default)]
struct Builder {
    path: Option<String>,
    children: BTreeMap<String, Builder>,
}

impl Builder {
    fn insert(&mut self, segments: &[&str], full_path: &str) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let child = self.children.entry(first.to_string()).or_default();
        if rest.is_empty() {
            child.path = Some(full_path.to_string());
        } else {
            child.insert(rest, full_path);
        }
    }

    fn into_nodes(self) -> Vec<FolderNode> {
        self.children
            .into_iter()
            .map(|(name, mut child)| {
                let path = child.path.take();
                FolderNode {
                    name,
                    path,
                    children: child.into_nodes(),
                }
            })
            .collect()
    }
}

impl ContentTree {
    /// Build nested folders from `/`-separated paths. Missing intermediate
    /// levels become virtual folders; siblings are ordered by name.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Builder::default();
        for path in paths {
            let path = path.as_ref();
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            root.insert(&segments, path);
        }
        Self {
            roots: root.into_nodes(),
        }
    }

    /// One folder per theory (in manifest order) holding its listed files.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let roots = manifest
            .theories
            .iter()
            .map(|theory| FolderNode {
                name: theory.theory_name.clone(),
                path: None,
                children: theory
                    .files
                    .iter()
                    .map(|file| FolderNode {
                        name: file
                            .file_path
                            .rsplit('/')
                            .next()
                            .unwrap_or(&file.file_path)
                            .to_string(),
                        path: Some(file.file_path.clone()),
                        children: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self { roots }
    }

    /// Find the node at a `/`-separated name path.
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        let mut nodes = &self.roots;
        let mut found = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let node = nodes.iter().find(|node| node.name == segment)?;
            nodes = &node.children;
            found = Some(node);
        }
        found
    }

    /// File paths in depth-first order.
    pub fn flatten(&self) -> Vec<String> {
        fn walk(nodes: &[FolderNode], out: &mut Vec<String>) {
            for node in nodes {
                if let Some(path) = &node.path {
                    out.push(path.clone());
                }
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    /// Indented text outline, one node per line.
    pub fn outline(&self) -> String {
        fn walk(nodes: &[FolderNode], depth: usize, out: &mut String) {
            for node in nodes {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&node.name);
                if node.is_virtual() && !node.children.is_empty() {
                    out.push('/');
                }
                out.push('\n');
                walk(&node.children, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(&self.roots, 0, &mut out);
        out
    }
}
