use serde::{Deserialize, Serialize};

use super::document::FlexibleDocument;
use super::UnknownVariant;

/// Inline content of a paragraph, title or caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RichTextSegment {
    Text(String),
    StyledText {
        text: String,
        #[serde(default)]
        styles: Vec<TextStyle>,
    },
    Math(MathNode),
    Link {
        content: Vec<RichTextSegment>,
        target: LinkTarget,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<String>,
    },
    FootnoteReference(String),
    CodeInline(String),
    #[serde(untagged)]
    Unknown(UnknownVariant),
}

impl RichTextSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Concatenated plain text, used for titles in attributes and search.
    pub fn plain_text(segments: &[RichTextSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            match segment {
                Self::Text(text) | Self::CodeInline(text) => out.push_str(text),
                Self::StyledText { text, .. } => out.push_str(text),
                Self::Math(math) => out.push_str(&math.content),
                Self::Link { content, .. } => out.push_str(&Self::plain_text(content)),
                Self::FootnoteReference(_) | Self::Unknown(_) => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Superscript,
    Subscript,
    Color(String),
    BackgroundColor(String),
    FontSize(String),
    FontFamily(String),
}

/// Where a link points. Resolution of the non-URL targets belongs to the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum LinkTarget {
    Url(String),
    InternalPageId(String),
    DefinitionId {
        term_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        theory_context: Option<String>,
    },
    DefinitionAspect {
        term_id: String,
        aspect_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        theory_context: Option<String>,
    },
    TheoremId(String),
    ObjectConstructorTemplate {
        template_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_abstraction_level: Option<u32>,
    },
    GlossaryTerm(String),
    BibliographyKey(String),
    InteractiveElementId(String),
    TooltipDocument(Box<FlexibleDocument>),
    AnimationTrigger {
        animation_id: String,
        trigger_type: String,
    },
    #[serde(untagged)]
    Unknown(UnknownVariant),
}

impl LinkTarget {
    /// Stable string identity of the target, used to detect self-referencing links.
    pub fn key(&self) -> String {
        match self {
            Self::Url(url) => format!("url:{url}"),
            Self::InternalPageId(id) => format!("page:{id}"),
            Self::DefinitionId {
                term_id,
                theory_context,
            } => format!(
                "definition:{}:{term_id}",
                theory_context.as_deref().unwrap_or_default()
            ),
            Self::DefinitionAspect {
                term_id,
                aspect_id,
                theory_context,
            } => format!(
                "aspect:{}:{term_id}:{aspect_id}",
                theory_context.as_deref().unwrap_or_default()
            ),
            Self::TheoremId(id) => format!("theorem:{id}"),
            Self::ObjectConstructorTemplate { template_id, .. } => {
                format!("template:{template_id}")
            }
            Self::GlossaryTerm(term) => format!("glossary:{term}"),
            Self::BibliographyKey(key) => format!("bib:{key}"),
            Self::InteractiveElementId(id) => format!("element:{id}"),
            Self::TooltipDocument(doc) => format!("tooltip:{}", doc.id),
            Self::AnimationTrigger {
                animation_id,
                trigger_type,
            } => format!("animation:{animation_id}:{trigger_type}"),
            Self::Unknown(unknown) => format!("unknown:{}", unknown.type_name),
        }
    }
}

/// Opaque math expression handed to an external typesetter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathNode {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_style: Option<bool>,
}

impl MathNode {
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            display_style: None,
        }
    }

    pub fn block(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            display_style: Some(true),
        }
    }

    pub fn is_block(&self) -> bool {
        self.display_style.unwrap_or(false)
    }
}
