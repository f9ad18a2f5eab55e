use serde::{Deserialize, Serialize};

use super::document::{FlexibleDocument, Section};
use super::layout::{AnnotationOverlay, InteractiveControls, PanelLayout, SideBySideLayout};
use super::rich_text::{MathNode, RichTextSegment};
use super::UnknownVariant;

/// Block-level content of a section. The recursive core of the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum SectionContentNode {
    Paragraph(ParagraphContent),
    MathBlock(MathBlockContent),
    StructuredMath(StructuredMathContent),
    List(ListContent),
    Table(TableContent),
    CodeBlock(CodeBlockContent),
    Image(ImageContent),
    InteractiveDiagram(InteractiveDiagramContent),
    CollapsibleBlock(CollapsibleBlockContent),
    Grid(GridContent),
    Columns(ColumnsContent),
    ThematicBreak,
    QuoteBlock(QuoteBlockContent),
    AlertBox(AlertBoxContent),
    CustomComponent(CustomComponentContent),
    EmbeddedSectionRef(EmbeddedSectionRef),
    SubSection(Section),
    SideBySideLayout(SideBySideLayout),
    PanelLayout(PanelLayout),
    AnnotationOverlay(AnnotationOverlay),
    InteractiveControls(InteractiveControls),
    EmbeddedDocument(Box<FlexibleDocument>),
    #[serde(untagged)]
    Unknown(UnknownVariant),
}

impl SectionContentNode {
    /// The `type` tag this node serializes under.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph(_) => "Paragraph",
            Self::MathBlock(_) => "MathBlock",
            Self::StructuredMath(_) => "StructuredMath",
            Self::List(_) => "List",
            Self::Table(_) => "Table",
            Self::CodeBlock(_) => "CodeBlock",
            Self::Image(_) => "Image",
            Self::InteractiveDiagram(_) => "InteractiveDiagram",
            Self::CollapsibleBlock(_) => "CollapsibleBlock",
            Self::Grid(_) => "Grid",
            Self::Columns(_) => "Columns",
            Self::ThematicBreak => "ThematicBreak",
            Self::QuoteBlock(_) => "QuoteBlock",
            Self::AlertBox(_) => "AlertBox",
            Self::CustomComponent(_) => "CustomComponent",
            Self::EmbeddedSectionRef(_) => "EmbeddedSectionRef",
            Self::SubSection(_) => "SubSection",
            Self::SideBySideLayout(_) => "SideBySideLayout",
            Self::PanelLayout(_) => "PanelLayout",
            Self::AnnotationOverlay(_) => "AnnotationOverlay",
            Self::InteractiveControls(_) => "InteractiveControls",
            Self::EmbeddedDocument(_) => "EmbeddedDocument",
            Self::Unknown(unknown) => unknown.display_name(),
        }
    }

    pub fn paragraph(segments: Vec<RichTextSegment>) -> Self {
        Self::Paragraph(ParagraphContent {
            segments,
            alignment: None,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph(vec![RichTextSegment::text(text)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justify,
    #[serde(other)]
    Unknown,
}

impl TextAlignment {
    /// `None` for an alignment this version does not know; no style is applied.
    pub fn as_css(self) -> Option<&'static str> {
        match self {
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
            Self::Justify => Some("justify"),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphContent {
    pub segments: Vec<RichTextSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathBlockContent {
    pub math: MathNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<RichTextSegment>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuredMathKind {
    Definition,
    Theorem,
    Lemma,
    Proposition,
    Corollary,
    Axiom,
    Example,
    Proof,
    Remark,
    #[serde(other)]
    Unknown,
}

impl StructuredMathKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Definition => "Definition",
            Self::Theorem => "Theorem",
            Self::Lemma => "Lemma",
            Self::Proposition => "Proposition",
            Self::Corollary => "Corollary",
            Self::Axiom => "Axiom",
            Self::Example => "Example",
            Self::Proof => "Proof",
            Self::Remark => "Remark",
            Self::Unknown => "Statement",
        }
    }
}

/// Theorem-like block: a labelled statement with an optional proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredMathContent {
    pub kind: StructuredMathKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextSegment>>,
    #[serde(default)]
    pub body: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Vec<SectionContentNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderedListStyle {
    Decimal,
    AlphaLower,
    AlphaUpper,
    RomanLower,
    RomanUpper,
    /// Rendered with decimal markers.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnorderedListStyle {
    Disc,
    Circle,
    Square,
    None,
    /// Rendered with disc markers.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum ListStyle {
    Ordered(OrderedListStyle),
    Unordered(UnorderedListStyle),
}

impl Default for ListStyle {
    fn default() -> Self {
        Self::Unordered(UnorderedListStyle::Disc)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListContent {
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub style: ListStyle,
    /// Only meaningful for ordered lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
    #[serde(default)]
    pub is_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<RichTextSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_rows: Option<Vec<TableRow>>,
    #[serde(default)]
    pub body_rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_rows: Option<Vec<TableRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockContent {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub show_line_numbers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<RichTextSegment>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<RichTextSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveDiagramContent {
    pub diagram_id: String,
    #[serde(default)]
    pub diagram_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<RichTextSegment>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapsibleBlockContent {
    pub id: String,
    pub summary: Vec<RichTextSegment>,
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default)]
    pub initially_collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
}

/// Positions are taken verbatim from the caller; nothing checks them against the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridContent {
    pub items: Vec<GridItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsContent {
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlockContent {
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Vec<RichTextSegment>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    Info,
    Note,
    Tip,
    Success,
    Warning,
    Error,
    #[serde(other)]
    Unknown,
}

impl AlertType {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Info => Some("alert-info"),
            Self::Note => Some("alert-note"),
            Self::Tip => Some("alert-tip"),
            Self::Success => Some("alert-success"),
            Self::Warning => Some("alert-warning"),
            Self::Error => Some("alert-error"),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertBoxContent {
    pub alert_type: AlertType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextSegment>>,
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomComponentContent {
    pub component_name: String,
    #[serde(default)]
    pub props: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_content: Option<Vec<SectionContentNode>>,
}

/// Reference to another section of the enclosing document, by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedSectionRef {
    pub section_id: String,
    #[serde(default)]
    pub show_title: bool,
}
