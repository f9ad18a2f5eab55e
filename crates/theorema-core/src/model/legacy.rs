//! Flat definition/theorem records and the manifest/bundle formats that carry them.
//!
//! Records are read leniently: a missing or mistyped field takes a default
//! instead of rejecting the record.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    pub docs: String,
    pub kind: String,
    pub members: Vec<String>,
}

impl Definition {
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let docs = object
            .get("docs")
            .or_else(|| object.get("documentation"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self {
            name: str_field(value, "name").unwrap_or(UNKNOWN_NAME).to_string(),
            docs: docs.to_string(),
            kind: str_field(value, "kind").unwrap_or(UNKNOWN_NAME).to_string(),
            members: string_list(value.get("members")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theorem {
    pub name: String,
    pub statement: String,
    pub description: String,
    pub proof_steps: Vec<String>,
    pub tags: Vec<String>,
}

impl Theorem {
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            name: str_field(value, "name").unwrap_or(UNKNOWN_NAME).to_string(),
            statement: str_field(value, "statement").unwrap_or_default().to_string(),
            description: str_field(value, "description")
                .unwrap_or_default()
                .to_string(),
            proof_steps: string_list(value.get("proof_steps")),
            tags: string_list(value.get("tags")),
        })
    }
}

/// Everything known about one theory, as consumed by the legacy views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MathContent {
    pub theory: String,
    pub definitions: Vec<Definition>,
    pub theorems: Vec<Theorem>,
}

impl MathContent {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.theorems.is_empty()
    }
}

/// Parse a flat definitions payload: a bare array, or an object wrapping one
/// under `definitions` or `content`.
pub fn definitions_from_value(value: &Value) -> Vec<Definition> {
    records(value, "definitions")
        .iter()
        .filter_map(|record| {
            let parsed = Definition::from_value(record);
            if parsed.is_none() {
                warn!("Skipping non-object definition record: {}", record);
            }
            parsed
        })
        .collect()
}

pub fn theorems_from_value(value: &Value) -> Vec<Theorem> {
    records(value, "theorems")
        .iter()
        .filter_map(|record| {
            let parsed = Theorem::from_value(record);
            if parsed.is_none() {
                warn!("Skipping non-object theorem record: {}", record);
            }
            parsed
        })
        .collect()
}

fn records<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    if let Some(items) = value.as_array() {
        return items;
    }
    value
        .get(key)
        .or_else(|| value.get("content"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            Value::Object(_) => item
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| item.to_string()),
            other => other.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFile {
    pub file_path: String,
    #[serde(default)]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestTheory {
    pub theory_id: String,
    pub theory_name: String,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub theories: Vec<ManifestTheory>,
}

impl Manifest {
    /// Match on `theory_id`, then on the slug of `theory_name`.
    pub fn find_theory(&self, id: &str) -> Option<&ManifestTheory> {
        self.theories
            .iter()
            .find(|theory| theory.theory_id == id)
            .or_else(|| {
                self.theories
                    .iter()
                    .find(|theory| crate::utils::slugify_identifier(&theory.theory_name) == id)
            })
    }
}

/// What a bundle item is, decided from the listing file and the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Definition,
    Theorem,
}

impl ContentKind {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        if label.starts_with("definition") {
            Some(Self::Definition)
        } else if label.starts_with("theorem")
            || label.starts_with("lemma")
            || label.starts_with("proposition")
            || label.starts_with("corollary")
        {
            Some(Self::Theorem)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    #[serde(default)]
    pub content: Vec<Value>,
    #[serde(default)]
    pub version: String,
}

impl ContentBundle {
    /// Split the bundle into definitions and theorems.
    ///
    /// `file_content_type` wins when it names a kind; otherwise each item is
    /// classified from its own `content_type`/`type`/`kind` field, and items
    /// carrying a `statement` are theorems.
    pub fn into_content(self, file_content_type: &str) -> (Vec<Definition>, Vec<Theorem>) {
        let file_kind = ContentKind::from_label(file_content_type);
        let mut definitions = Vec::new();
        let mut theorems = Vec::new();

        for item in &self.content {
            let kind = file_kind.or_else(|| classify_item(item));
            match kind {
                Some(ContentKind::Definition) => {
                    definitions.extend(Definition::from_value(item));
                }
                Some(ContentKind::Theorem) => {
                    theorems.extend(Theorem::from_value(item));
                }
                None => warn!("Unclassifiable bundle item: {}", item),
            }
        }

        (definitions, theorems)
    }
}

fn classify_item(item: &Value) -> Option<ContentKind> {
    ["content_type", "type", "kind"]
        .iter()
        .filter_map(|key| str_field(item, key))
        .find_map(ContentKind::from_label)
        .or_else(|| {
            if item.get("statement").is_some() {
                Some(ContentKind::Theorem)
            } else if item.get("docs").is_some() || item.get("documentation").is_some() {
                Some(ContentKind::Definition)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_defaults_missing_fields() {
        let def = Definition::from_value(&json!({ "documentation": "A set with an operation" }))
            .unwrap();
        assert_eq!(def.name, "Unknown");
        assert_eq!(def.kind, "Unknown");
        assert_eq!(def.docs, "A set with an operation");
        assert!(def.members.is_empty());
    }

    #[test]
    fn test_definition_mistyped_fields_fall_back() {
        let def = Definition::from_value(&json!({
            "name": 42,
            "docs": ["not", "a", "string"],
            "members": [{ "name": "op" }, "identity", 3]
        }))
        .unwrap();
        assert_eq!(def.name, "Unknown");
        assert_eq!(def.docs, "");
        assert_eq!(def.members, vec!["op", "identity", "3"]);
    }

    #[test]
    fn test_theorem_list_skips_non_objects() {
        let theorems = theorems_from_value(&json!([
            { "name": "Lagrange", "statement": "|H| divides |G|", "tags": ["order"] },
            "garbage"
        ]));
        assert_eq!(theorems.len(), 1);
        assert_eq!(theorems[0].tags, vec!["order"]);
        assert!(theorems[0].proof_steps.is_empty());
    }

    #[test]
    fn test_wrapped_definitions_payload() {
        let defs = definitions_from_value(&json!({ "definitions": [{ "name": "Group" }] }));
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "Group");
    }

    #[test]
    fn test_bundle_classification() {
        let bundle = ContentBundle {
            content: vec![
                json!({ "name": "Group", "docs": "..." }),
                json!({ "name": "Lagrange", "statement": "..." }),
                json!({ "name": "Subgroup", "kind": "Definition" }),
                json!({ "name": "???" }),
            ],
            version: "1".to_string(),
        };
        let (defs, thms) = bundle.into_content("");
        assert_eq!(defs.len(), 2);
        assert_eq!(thms.len(), 1);
    }

    #[test]
    fn test_bundle_file_type_overrides_items() {
        let bundle = ContentBundle {
            content: vec![json!({ "name": "Lagrange", "statement": "..." })],
            version: "1".to_string(),
        };
        let (defs, thms) = bundle.into_content("definitions");
        assert_eq!(defs.len(), 1);
        assert!(thms.is_empty());
    }

    #[test]
    fn test_manifest_lookup_by_slugged_name() {
        let manifest: Manifest = serde_json::from_value(json!({
            "theories": [{ "theory_id": "gt", "theory_name": "Group Theory", "files": [] }]
        }))
        .unwrap();
        assert!(manifest.find_theory("gt").is_some());
        assert!(manifest.find_theory("group_theory").is_some());
        assert!(manifest.find_theory("ring_theory").is_none());
    }
}
