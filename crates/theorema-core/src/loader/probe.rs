use crate::config::ContentConfig;

const THEORY_DIR_PREFIX: &str = "theory_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheoryFile {
    Definitions,
    Theorems,
}

impl TheoryFile {
    fn file_names(self) -> [&'static str; 2] {
        match self {
            Self::Definitions => ["definitions.json", "definition.json"],
            Self::Theorems => ["theorems.json", "theorem.json"],
        }
    }
}

/// Ordered fallback paths for one file of a theory.
///
/// Order: each configured base, then the directory name without and with
/// the `theory_` prefix, then the plural and singular file name.
pub fn theory_candidates(config: &ContentConfig, theory_id: &str, file: TheoryFile) -> Vec<String> {
    let alternate = match theory_id.strip_prefix(THEORY_DIR_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => format!("{THEORY_DIR_PREFIX}{theory_id}"),
    };
    let dirs = [theory_id.to_string(), alternate];

    let mut candidates = Vec::new();
    for base in &config.theory_bases {
        let base = base.trim_end_matches('/');
        for dir in &dirs {
            for name in file.file_names() {
                candidates.push(format!("{base}/{dir}/{name}"));
            }
        }
    }
    candidates
}

/// Ordered fallback paths for a flexible document.
pub fn document_candidates(config: &ContentConfig, document_id: &str) -> Vec<String> {
    let id = document_id.trim_matches('/').trim_end_matches(".json");
    config
        .document_bases
        .iter()
        .flat_map(|base| {
            let base = base.trim_end_matches('/');
            [format!("{base}/{id}.json"), format!("{base}/{id}/document.json")]
        })
        .collect()
}
