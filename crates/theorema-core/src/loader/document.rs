use log::{debug, warn};

use super::probe::document_candidates;
use super::{ContentLoader, LoadOutcome, Provenance};
use crate::error::ContentError;
use crate::model::{DocumentType, FlexibleDocument, RichTextSegment, Section, SectionContentNode};
use crate::model::{AlertBoxContent, AlertType};
use crate::utils::glob_match;

impl ContentLoader {
    /// Resolve a flexible document by id.
    ///
    /// A candidate that answers with JSON which is not a valid document is
    /// skipped like a missing one, but is remembered so the placeholder can
    /// say the document exists and is malformed.
    pub fn load_document(&self, document_id: &str) -> LoadOutcome<FlexibleDocument> {
        let mut tried = Vec::new();
        let mut malformed = Vec::new();

        for candidate in document_candidates(&self.config.content, document_id) {
            let value = match self.fetch_json(&candidate) {
                Ok(value) => value,
                Err(e @ ContentError::Parse { .. }) => {
                    warn!("{}", e);
                    malformed.push(candidate);
                    continue;
                }
                Err(e) => {
                    debug!("Probe miss: {}", e);
                    tried.push(candidate);
                    continue;
                }
            };

            match serde_json::from_value::<FlexibleDocument>(value) {
                Ok(document) => return LoadOutcome::loaded(document, vec![candidate]),
                Err(e) => {
                    warn!("{} is not a flexible document: {}", candidate, e);
                    malformed.push(candidate);
                }
            }
        }

        if malformed.is_empty() {
            warn!("Document '{}' not found", document_id);
            LoadOutcome {
                value: placeholder_document(
                    document_id,
                    "Not Found",
                    "This document could not be located.",
                ),
                provenance: Provenance::NotFound { tried },
            }
        } else {
            LoadOutcome {
                value: placeholder_document(
                    document_id,
                    "Unavailable",
                    "This document exists but could not be read.",
                ),
                provenance: Provenance::Placeholder {
                    reason: format!("malformed document at {}", malformed.join(", ")),
                },
            }
        }
    }

    /// Glob-style discovery over the source's JSON files, minus ignored paths.
    pub fn discover(&self, pattern: &str) -> Vec<String> {
        let ignore = &self.config.content.ignore_patterns;
        self.source
            .list_files("/", "json")
            .into_iter()
            .filter(|path| glob_match(pattern, path))
            .filter(|path| !ignore.iter().any(|ignored| glob_match(ignored, path)))
            .collect()
    }
}

fn placeholder_document(document_id: &str, label: &str, message: &str) -> FlexibleDocument {
    let notice = SectionContentNode::AlertBox(AlertBoxContent {
        alert_type: AlertType::Warning,
        title: Some(vec![RichTextSegment::text(label)]),
        content: vec![SectionContentNode::text(message)],
    });
    FlexibleDocument::new(
        document_id,
        format!("{document_id} ({label})"),
        DocumentType::Documentation,
    )
    .with_body(vec![Section::new("placeholder").with_content(vec![notice])])
}
