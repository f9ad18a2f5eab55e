use serde::{Deserialize, Serialize};

use super::content::SectionContentNode;
use super::rich_text::RichTextSegment;

/// A named container of content nodes.
///
/// `id` is unique within a document and is emitted verbatim as the HTML anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextSegment>>,
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<(String, String)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<SectionDisplayOptions>,
}

impl Section {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            content: Vec::new(),
            metadata: None,
            display_options: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(vec![RichTextSegment::text(title)]);
        self
    }

    pub fn with_content(mut self, content: Vec<SectionContentNode>) -> Self {
        self.content = content;
        self
    }

    pub fn title_text(&self) -> Option<String> {
        self.title.as_deref().map(RichTextSegment::plain_text)
    }

    /// Depth-first search through this section and its `SubSection` children.
    pub fn find(&self, id: &str) -> Option<&Section> {
        if self.id == id {
            return Some(self);
        }
        self.content.iter().find_map(|node| match node {
            SectionContentNode::SubSection(child) => child.find(id),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionDisplayOptions {
    #[serde(default = "default_true")]
    pub show_title: bool,
    #[serde(default)]
    pub numbered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Documentation,
    Tutorial,
    Reference,
    Article,
    BlogPost,
    MathematicalContent,
    Lecture,
    InteractiveDemo,
    Glossary,
    Textbook,
    ResourcePanel,
    AnimatedPresentation,
    ComparisonPage,
    TypeMappingDisplay,
    TransformationMapping,
    #[serde(other)]
    Unknown,
}

impl DocumentType {
    /// Types whose wrapper arranges its own layout and ignores `layout_style`.
    pub fn is_self_laying_out(self) -> bool {
        matches!(
            self,
            Self::Textbook
                | Self::ResourcePanel
                | Self::AnimatedPresentation
                | Self::ComparisonPage
                | Self::TypeMappingDisplay
                | Self::TransformationMapping
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "Documentation",
            Self::Tutorial => "Tutorial",
            Self::Reference => "Reference",
            Self::Article => "Article",
            Self::BlogPost => "BlogPost",
            Self::MathematicalContent => "MathematicalContent",
            Self::Lecture => "Lecture",
            Self::InteractiveDemo => "InteractiveDemo",
            Self::Glossary => "Glossary",
            Self::Textbook => "Textbook",
            Self::ResourcePanel => "ResourcePanel",
            Self::AnimatedPresentation => "AnimatedPresentation",
            Self::ComparisonPage => "ComparisonPage",
            Self::TypeMappingDisplay => "TypeMappingDisplay",
            Self::TransformationMapping => "TransformationMapping",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutStyle {
    SingleColumn,
    TwoColumn,
    Sidebar,
    Grid,
    Magazine,
    Slides,
    Notebook,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InteractionFeature {
    Hover,
    Click,
    Expand,
    Search,
    Filter,
    Copy,
    Bookmark,
    Annotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetAudience {
    #[default]
    General,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Student,
    Researcher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormalityLevel {
    Casual,
    Informal,
    #[default]
    Standard,
    Formal,
    Rigorous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub layout_style: LayoutStyle,
    #[serde(default)]
    pub interaction_features: Vec<InteractionFeature>,
    #[serde(default)]
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub formality_level: FormalityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_config: Option<AnimationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibEntry {
    pub key: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    pub id: String,
    pub content: Vec<RichTextSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: Vec<RichTextSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub section_id: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<TocEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOfContents {
    #[serde(default)]
    pub entries: Vec<TocEntry>,
    /// Build entries from the section tree instead of the listed ones.
    #[serde(default)]
    pub auto_generate: bool,
}

/// Top-level envelope of a renderable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleDocument {
    pub id: String,
    pub title: String,
    pub document_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_config: Option<PresentationConfig>,
    #[serde(default)]
    pub body: Vec<Section>,
    #[serde(default)]
    pub bibliography: Vec<BibEntry>,
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_content: Option<Vec<RichTextSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<TableOfContents>,
    #[serde(default)]
    pub footnotes: Vec<Footnote>,
    #[serde(default)]
    pub glossary: Vec<GlossaryEntry>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl FlexibleDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, document_type: DocumentType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            document_type,
            presentation_config: None,
            body: Vec::new(),
            bibliography: Vec::new(),
            abstract_content: None,
            table_of_contents: None,
            footnotes: Vec::new(),
            glossary: Vec::new(),
            authors: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_body(mut self, body: Vec<Section>) -> Self {
        self.body = body;
        self
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.body.iter().find_map(|section| section.find(id))
    }

    /// Table of contents derived from the section tree (titled sections only).
    pub fn generated_toc(&self) -> Vec<TocEntry> {
        fn entries(sections: &[&Section]) -> Vec<TocEntry> {
            sections
                .iter()
                .filter_map(|section| {
                    let title = section.title_text()?;
                    let children: Vec<&Section> = section
                        .content
                        .iter()
                        .filter_map(|node| match node {
                            SectionContentNode::SubSection(child) => Some(child),
                            _ => None,
                        })
                        .collect();
                    Some(TocEntry {
                        section_id: section.id.clone(),
                        title,
                        children: entries(&children),
                    })
                })
                .collect()
        }
        let top: Vec<&Section> = self.body.iter().collect();
        entries(&top)
    }
}
