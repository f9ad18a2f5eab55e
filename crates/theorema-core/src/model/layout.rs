use serde::{Deserialize, Serialize};

use super::content::SectionContentNode;
use super::rich_text::RichTextSegment;
use super::UnknownVariant;

/// A titled group of content nodes; the unit every layout composite arranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextSegment>>,
    #[serde(default)]
    pub content: Vec<SectionContentNode>,
    #[serde(default)]
    pub initially_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBySideConfig {
    #[serde(default = "default_fraction")]
    pub left_width: String,
    #[serde(default = "default_fraction")]
    pub right_width: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

impl Default for SideBySideConfig {
    fn default() -> Self {
        Self {
            left_width: default_fraction(),
            right_width: default_fraction(),
            gap: None,
        }
    }
}

fn default_fraction() -> String {
    "1fr".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBySideLayout {
    pub left: Panel,
    pub right: Panel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_config: Option<SideBySideConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum PanelLayoutType {
    Tabs,
    Accordion,
    Grid { columns: u32 },
    Sidebar { main_panel_id: String },
    FloatingPanels,
    /// Panels are stacked with no layout styling.
    #[serde(untagged)]
    Unknown(UnknownVariant),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub id: String,
    pub panels: Vec<Panel>,
    pub layout_type: PanelLayoutType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationType {
    Note,
    Highlight,
    Explanation,
    Warning,
    Definition,
    Example,
    Reference,
    #[serde(other)]
    Unknown,
}

impl AnnotationType {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Note => Some("annotation-note"),
            Self::Highlight => Some("annotation-highlight"),
            Self::Explanation => Some("annotation-explanation"),
            Self::Warning => Some("annotation-warning"),
            Self::Definition => Some("annotation-definition"),
            Self::Example => Some("annotation-example"),
            Self::Reference => Some("annotation-reference"),
            Self::Unknown => None,
        }
    }
}

/// Absolute placement inside the overlay, CSS lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPosition {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub annotation_type: AnnotationType,
    #[serde(default)]
    pub content: Vec<RichTextSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<AnnotationPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationOverlay {
    pub id: String,
    #[serde(default)]
    pub base_content: Vec<SectionContentNode>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum ControlType {
    Slider {
        min: f64,
        max: f64,
        #[serde(default = "default_step")]
        step: f64,
    },
    Toggle,
    Dropdown {
        options: Vec<SelectOption>,
    },
    NumberInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    ColorPicker,
    Button {
        action: String,
    },
    RadioGroup {
        options: Vec<SelectOption>,
    },
    /// Rendered as a marker in place of the one control.
    #[serde(untagged)]
    Unknown(UnknownVariant),
}

fn default_step() -> f64 {
    1.0
}

impl ControlType {
    /// Value a control starts with when the payload declares none.
    pub fn initial_value(&self) -> ControlValue {
        match self {
            Self::Slider { min, .. } => ControlValue::Number(*min),
            Self::NumberInput { min, .. } => ControlValue::Number(min.unwrap_or(0.0)),
            Self::Toggle | Self::Button { .. } => ControlValue::Bool(false),
            Self::Dropdown { options } | Self::RadioGroup { options } => ControlValue::Text(
                options
                    .first()
                    .map(|option| option.value.clone())
                    .unwrap_or_default(),
            ),
            Self::ColorPicker => ControlValue::Text("#000000".to_string()),
            Self::Unknown(_) => ControlValue::Text(String::new()),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "control-slider",
            Self::Toggle => "control-toggle",
            Self::Dropdown { .. } => "control-dropdown",
            Self::NumberInput { .. } => "control-number",
            Self::ColorPicker => "control-color",
            Self::Button { .. } => "control-button",
            Self::RadioGroup { .. } => "control-radio",
            Self::Unknown(_) => "control-unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ControlValue {
    pub fn to_attr(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub control_type: ControlType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ControlValue>,
    #[serde(default)]
    pub target_content_ids: Vec<String>,
}

impl Control {
    pub fn seed_value(&self) -> ControlValue {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.control_type.initial_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlsLayout {
    #[default]
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveControls {
    pub id: String,
    pub controls: Vec<Control>,
    #[serde(default)]
    pub layout: ControlsLayout,
}
