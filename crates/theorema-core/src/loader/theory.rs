use log::{debug, info, warn};

use super::probe::{theory_candidates, TheoryFile};
use super::{ContentLoader, LoadOutcome, Provenance};
use crate::error::{ContentError, Result};
use crate::model::{
    definitions_from_value, theorems_from_value, ContentBundle, Definition, ManifestTheory,
    MathContent, Theorem,
};
use crate::utils::{normalize_theory_path, title_case};

pub const NOT_FOUND_SUFFIX: &str = "(Not Found)";

/// One search match within a category.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    Definition {
        theory: String,
        definition: Definition,
    },
    Theorem {
        theory: String,
        theorem: Theorem,
    },
}

impl SearchHit {
    pub fn name(&self) -> &str {
        match self {
            Self::Definition { definition, .. } => &definition.name,
            Self::Theorem { theorem, .. } => &theorem.name,
        }
    }
}

impl ContentLoader {
    /// Resolve a theory to its definitions and theorems.
    ///
    /// Strategies run in order and short-circuit on the first success:
    /// the manifest listing, then per-file path probing, then a labelled
    /// placeholder.
    pub fn load_theory(&self, theory_path: &str) -> LoadOutcome<MathContent> {
        let theory_id = normalize_theory_path(theory_path);
        let manifest_entry = match self.load_manifest() {
            Ok(manifest) => manifest.find_theory(&theory_id).cloned(),
            Err(e) => {
                debug!("Manifest unavailable: {}", e);
                None
            }
        };
        let display_name = manifest_entry
            .as_ref()
            .map(|theory| theory.theory_name.clone())
            .unwrap_or_else(|| title_case(&theory_id));

        if let Some(theory) = &manifest_entry {
            match self.load_from_manifest(theory) {
                Ok((content, paths)) => {
                    info!(
                        "Loaded theory '{}' from manifest ({} definitions, {} theorems)",
                        theory.theory_id,
                        content.definitions.len(),
                        content.theorems.len()
                    );
                    return LoadOutcome::loaded(content, paths);
                }
                Err(e) => warn!("Manifest load of '{}' failed: {}", theory.theory_id, e),
            }
        }

        let mut tried = Vec::new();
        let mut paths = Vec::new();
        let definitions =
            self.probe_file(&theory_id, TheoryFile::Definitions, &mut tried, &mut paths);
        let theorems = self.probe_file(&theory_id, TheoryFile::Theorems, &mut tried, &mut paths);

        if definitions.is_some() || theorems.is_some() {
            let content = MathContent {
                theory: display_name,
                definitions: definitions
                    .map(|value| definitions_from_value(&value))
                    .unwrap_or_default(),
                theorems: theorems
                    .map(|value| theorems_from_value(&value))
                    .unwrap_or_default(),
            };
            return LoadOutcome::loaded(content, paths);
        }

        warn!(
            "Theory '{}' not found after {} candidate paths",
            theory_id,
            tried.len()
        );
        not_found_theory(&display_name, tried)
    }

    fn load_from_manifest(&self, theory: &ManifestTheory) -> Result<(MathContent, Vec<String>)> {
        let mut content = MathContent {
            theory: theory.theory_name.clone(),
            ..MathContent::default()
        };
        let mut paths = Vec::new();

        // The first failing file fails the whole listing.
        for file in &theory.files {
            let path = self.resolve_manifest_file(&theory.theory_id, &file.file_path);
            let value = self.fetch_json(&path)?;
            let content_type = content_type_of(&file.content_type, &path);
            let (definitions, theorems) = if value.get("content").is_some() {
                match serde_json::from_value::<ContentBundle>(value) {
                    Ok(bundle) => bundle.into_content(&content_type),
                    Err(source) => return Err(ContentError::Parse { path, source }),
                }
            } else {
                flat_records(&value, &content_type)
            };
            content.definitions.extend(definitions);
            content.theorems.extend(theorems);
            paths.push(path);
        }

        if content.is_empty() {
            return Err(ContentError::EmptyTheory(theory.theory_id.clone()));
        }
        Ok((content, paths))
    }

    /// Absolute paths are used as-is; paths with a directory are relative to
    /// the manifest; bare file names live in the theory's directory under the
    /// first theory base.
    pub(crate) fn resolve_manifest_file(&self, theory_id: &str, file_path: &str) -> String {
        if file_path.starts_with('/') {
            return file_path.to_string();
        }
        let content = &self.config.content;
        if file_path.contains('/') {
            let manifest_dir = content
                .manifest_path
                .rsplit_once('/')
                .map(|(dir, _)| dir)
                .unwrap_or_default();
            return format!("{manifest_dir}/{file_path}");
        }
        let base = content
            .theory_bases
            .first()
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or_default();
        format!("{base}/{theory_id}/{file_path}")
    }

    fn probe_file(
        &self,
        theory_id: &str,
        file: TheoryFile,
        tried: &mut Vec<String>,
        paths: &mut Vec<String>,
    ) -> Option<serde_json::Value> {
        for candidate in theory_candidates(&self.config.content, theory_id, file) {
            match self.fetch_json(&candidate) {
                Ok(value) => {
                    debug!("Resolved {:?} of '{}' at {}", file, theory_id, candidate);
                    paths.push(candidate);
                    return Some(value);
                }
                Err(e) => {
                    debug!("Probe miss: {}", e);
                    tried.push(candidate);
                }
            }
        }
        None
    }

    /// Case-insensitive search across categories. A category that fails to
    /// load contributes nothing.
    pub fn search(&self, query: &str, categories: &[String]) -> Vec<SearchHit> {
        categories
            .iter()
            .flat_map(|category| search_content(&self.load_theory(category), query))
            .collect()
    }

    /// Theory ids listed in the manifest, in manifest order.
    pub fn categories(&self) -> Vec<String> {
        self.load_manifest()
            .map(|manifest| {
                manifest
                    .theories
                    .into_iter()
                    .map(|theory| theory.theory_id)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Matches within one loaded theory; placeholders never match.
pub fn search_content(outcome: &LoadOutcome<MathContent>, query: &str) -> Vec<SearchHit> {
    if !outcome.provenance.is_loaded() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let content = &outcome.value;
    let mut hits = Vec::new();

    for definition in &content.definitions {
        if definition.name.to_lowercase().contains(&needle)
            || definition.docs.to_lowercase().contains(&needle)
        {
            hits.push(SearchHit::Definition {
                theory: content.theory.clone(),
                definition: definition.clone(),
            });
        }
    }
    for theorem in &content.theorems {
        if theorem.name.to_lowercase().contains(&needle)
            || theorem.statement.to_lowercase().contains(&needle)
            || theorem.tags.iter().any(|tag| tag.to_lowercase() == needle)
        {
            hits.push(SearchHit::Theorem {
                theory: content.theory.clone(),
                theorem: theorem.clone(),
            });
        }
    }
    hits
}

/// The listing's content type, or one inferred from the file name.
fn content_type_of(declared: &str, path: &str) -> String {
    if !declared.is_empty() {
        return declared.to_string();
    }
    let file_name = path.rsplit('/').next().unwrap_or_default();
    if file_name.starts_with("definition") {
        "definitions".to_string()
    } else if file_name.starts_with("theorem") {
        "theorems".to_string()
    } else {
        String::new()
    }
}

fn flat_records(value: &serde_json::Value, content_type: &str) -> (Vec<Definition>, Vec<Theorem>) {
    if content_type.starts_with("theorem") {
        (Vec::new(), theorems_from_value(value))
    } else {
        (definitions_from_value(value), Vec::new())
    }
}

fn not_found_theory(display_name: &str, tried: Vec<String>) -> LoadOutcome<MathContent> {
    let name = format!("{display_name} {NOT_FOUND_SUFFIX}");
    let placeholder = Definition {
        name: name.clone(),
        docs: format!(
            "Content for **{display_name}** could not be located. {} candidate paths were tried.",
            tried.len()
        ),
        kind: "Placeholder".to_string(),
        members: Vec::new(),
    };
    LoadOutcome {
        value: MathContent {
            theory: name,
            definitions: vec![placeholder],
            theorems: Vec::new(),
        },
        provenance: Provenance::NotFound { tried },
    }
}
