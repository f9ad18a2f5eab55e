use log::warn;

use super::html::css_value;
use super::RenderContext;
use crate::model::{
    Annotation, AnnotationOverlay, Control, ControlType, ControlValue, ControlsLayout,
    InteractiveControls, Panel, PanelLayout, PanelLayoutType, RichTextSegment, SideBySideLayout,
};
use crate::state::PanelState;

impl<'a> RenderContext<'a> {
    fn render_panel(
        &mut self,
        panel: &'a Panel,
        class: &str,
        visible: bool,
        extra: &[(&str, &str)],
    ) {
        let id = format!("panel-{}", panel.id);
        let class = format!("panel {class}");
        let mut attrs = vec![
            ("class", class.as_str()),
            ("id", id.as_str()),
            ("data-panel-id", panel.id.as_str()),
        ];
        attrs.extend_from_slice(extra);
        if visible {
            self.open("div", &attrs);
        } else {
            self.open_with_flags("div", &attrs, &["hidden"]);
        }
        if let Some(title) = &panel.title {
            self.open("h4", &[("class", "panel-title")]);
            self.render_rich_text(title);
            self.close("h4");
        }
        self.render_nodes(&panel.content);
        self.close("div");
    }

    pub(crate) fn render_side_by_side(&mut self, layout: &'a SideBySideLayout) {
        let config = layout.layout_config.clone().unwrap_or_default();
        let mut style = format!(
            "display: grid; grid-template-columns: {} {}",
            css_value(&config.left_width),
            css_value(&config.right_width)
        );
        if let Some(gap) = &config.gap {
            style.push_str(&format!("; gap: {}", css_value(gap)));
        }
        self.open("div", &[("class", "side-by-side"), ("style", &style)]);
        self.render_panel(&layout.left, "side-left", true, &[]);
        self.render_panel(&layout.right, "side-right", true, &[]);
        self.close("div");
    }

    pub(crate) fn render_panel_layout(&mut self, layout: &'a PanelLayout) {
        let state = self.state.panel_state(layout);
        match &layout.layout_type {
            PanelLayoutType::Tabs => self.render_tabs(layout, &state),
            PanelLayoutType::Accordion => self.render_accordion(layout, &state),
            PanelLayoutType::Grid { columns } => {
                let style = format!(
                    "display: grid; grid-template-columns: repeat({}, 1fr)",
                    (*columns).max(1)
                );
                self.open(
                    "div",
                    &[
                        ("class", "panel-layout layout-grid"),
                        ("data-layout-id", &layout.id),
                        ("style", &style),
                    ],
                );
                for panel in &layout.panels {
                    self.render_panel(panel, "grid-panel", true, &[]);
                }
                self.close("div");
            }
            PanelLayoutType::Sidebar { main_panel_id } => {
                self.render_sidebar(layout, main_panel_id)
            }
            PanelLayoutType::FloatingPanels => {
                self.open(
                    "div",
                    &[
                        ("class", "panel-layout layout-floating"),
                        ("data-layout-id", &layout.id),
                    ],
                );
                for panel in &layout.panels {
                    self.render_panel(panel, "floating-panel", true, &[]);
                }
                self.close("div");
            }
            PanelLayoutType::Unknown(unknown) => {
                warn!(
                    "Unknown panel layout '{}' on '{}'",
                    unknown.display_name(),
                    layout.id
                );
                self.open(
                    "div",
                    &[
                        ("class", "panel-layout"),
                        ("data-layout-id", &layout.id),
                        ("data-layout-type", unknown.display_name()),
                    ],
                );
                for panel in &layout.panels {
                    self.render_panel(panel, "stacked-panel", true, &[]);
                }
                self.close("div");
            }
        }
    }

    fn render_tabs(&mut self, layout: &'a PanelLayout, state: &PanelState) {
        self.open(
            "div",
            &[("class", "panel-layout layout-tabs"), ("data-layout-id", &layout.id)],
        );
        self.open("div", &[("class", "tab-list"), ("role", "tablist")]);
        for panel in &layout.panels {
            let active = state.is_visible(&panel.id);
            let class = if active { "tab tab-active" } else { "tab" };
            self.open(
                "button",
                &[
                    ("type", "button"),
                    ("class", class),
                    ("role", "tab"),
                    ("data-panel-id", &panel.id),
                    ("aria-selected", if active { "true" } else { "false" }),
                ],
            );
            self.render_panel_label(panel);
            self.close("button");
        }
        self.close("div");

        for panel in &layout.panels {
            let active = state.is_visible(&panel.id);
            let class = if active { "tab-panel panel-active" } else { "tab-panel" };
            self.render_panel(panel, class, active, &[("role", "tabpanel")]);
        }
        self.close("div");
    }

    fn render_accordion(&mut self, layout: &'a PanelLayout, state: &PanelState) {
        self.open(
            "div",
            &[
                ("class", "panel-layout layout-accordion"),
                ("data-layout-id", &layout.id),
            ],
        );
        for panel in &layout.panels {
            let open = state.is_visible(&panel.id);
            let flag = if open { "true" } else { "false" };
            self.open(
                "div",
                &[
                    ("class", "accordion-item"),
                    ("data-panel-id", &panel.id),
                    ("data-open", flag),
                ],
            );
            self.open(
                "button",
                &[
                    ("type", "button"),
                    ("class", "accordion-toggle"),
                    ("aria-expanded", flag),
                ],
            );
            self.render_panel_label(panel);
            self.close("button");
            self.render_panel(panel, "accordion-panel", open, &[]);
            self.close("div");
        }
        self.close("div");
    }

    /// The main panel is the named one, else the first.
    fn render_sidebar(&mut self, layout: &'a PanelLayout, main_panel_id: &str) {
        let main = layout
            .panels
            .iter()
            .position(|panel| panel.id == main_panel_id)
            .or(if layout.panels.is_empty() { None } else { Some(0) });

        self.open(
            "div",
            &[
                ("class", "panel-layout layout-sidebar"),
                ("data-layout-id", &layout.id),
                ("style", "display: grid; grid-template-columns: 3fr 1fr"),
            ],
        );
        if let Some(index) = main {
            self.open("div", &[("class", "sidebar-main")]);
            self.render_panel(&layout.panels[index], "main-panel", true, &[]);
            self.close("div");
        }
        self.open("aside", &[("class", "sidebar-panels")]);
        for (index, panel) in layout.panels.iter().enumerate() {
            if Some(index) != main {
                self.render_panel(panel, "side-panel", true, &[]);
            }
        }
        self.close("aside");
        self.close("div");
    }

    fn render_panel_label(&mut self, panel: &'a Panel) {
        match &panel.title {
            Some(title) => self.text(&RichTextSegment::plain_text(title)),
            None => self.text(&panel.id),
        }
    }

    pub(crate) fn render_annotation_overlay(&mut self, overlay: &'a AnnotationOverlay) {
        self.open(
            "div",
            &[
                ("class", "annotation-overlay"),
                ("id", &overlay.id),
                ("data-overlay-id", &overlay.id),
                ("style", "position: relative"),
            ],
        );
        self.open("div", &[("class", "annotation-base")]);
        self.render_nodes(&overlay.base_content);
        self.close("div");
        for annotation in &overlay.annotations {
            self.render_annotation(annotation);
        }
        self.close("div");
    }

    fn render_annotation(&mut self, annotation: &'a Annotation) {
        let class = match annotation.annotation_type.css_class() {
            Some(kind) => format!("annotation {kind}"),
            None => "annotation".to_string(),
        };
        let style = annotation.position.as_ref().map(|position| {
            format!(
                "position: absolute; left: {}; top: {}",
                css_value(&position.x),
                css_value(&position.y)
            )
        });
        let tag = if style.is_some() { "div" } else { "aside" };

        let mut attrs = vec![
            ("class", class.as_str()),
            ("data-annotation-id", annotation.id.as_str()),
        ];
        if let Some(target) = &annotation.target_id {
            attrs.push(("data-target-id", target.as_str()));
        }
        if let Some(style) = &style {
            attrs.push(("style", style.as_str()));
        }
        self.open(tag, &attrs);
        self.render_rich_text(&annotation.content);
        self.close(tag);
    }

    pub(crate) fn render_controls(&mut self, controls: &'a InteractiveControls) {
        let class = match controls.layout {
            ControlsLayout::Horizontal => "interactive-controls controls-horizontal",
            ControlsLayout::Vertical => "interactive-controls controls-vertical",
            ControlsLayout::Unknown => "interactive-controls",
        };
        self.open("form", &[("class", class), ("data-controls-id", &controls.id)]);
        for control in &controls.controls {
            let value = self
                .state
                .control_value(controls, &control.id)
                .unwrap_or_else(|| control.seed_value());
            self.render_control(&controls.id, control, &value);
        }
        self.close("form");
    }

    fn render_control(&mut self, group_id: &str, control: &'a Control, value: &ControlValue) {
        let input_id = format!("{group_id}-{}", control.id);
        let class = format!("control {}", control.control_type.css_class());
        let targets = control.target_content_ids.join(" ");
        self.open(
            "div",
            &[
                ("class", &class),
                ("data-control-id", &control.id),
                ("data-targets", &targets),
            ],
        );

        let current = value.to_attr();
        match &control.control_type {
            ControlType::Slider { min, max, step } => {
                self.element("label", &[("for", &input_id)], &control.label);
                let (min, max, step) = (min.to_string(), max.to_string(), step.to_string());
                self.open(
                    "input",
                    &[
                        ("type", "range"),
                        ("id", &input_id),
                        ("min", &min),
                        ("max", &max),
                        ("step", &step),
                        ("value", &current),
                    ],
                );
            }
            ControlType::NumberInput { min, max, step } => {
                self.element("label", &[("for", &input_id)], &control.label);
                let bounds: Vec<(&str, String)> = [("min", min), ("max", max), ("step", step)]
                    .into_iter()
                    .filter_map(|(name, bound)| bound.map(|bound| (name, bound.to_string())))
                    .collect();
                let mut attrs = vec![
                    ("type", "number"),
                    ("id", input_id.as_str()),
                    ("value", current.as_str()),
                ];
                attrs.extend(bounds.iter().map(|(name, bound)| (*name, bound.as_str())));
                self.open("input", &attrs);
            }
            ControlType::Toggle => {
                let attrs = [("type", "checkbox"), ("id", input_id.as_str())];
                if *value == ControlValue::Bool(true) {
                    self.open_with_flags("input", &attrs, &["checked"]);
                } else {
                    self.open("input", &attrs);
                }
                self.element("label", &[("for", &input_id)], &control.label);
            }
            ControlType::ColorPicker => {
                self.element("label", &[("for", &input_id)], &control.label);
                self.open(
                    "input",
                    &[("type", "color"), ("id", &input_id), ("value", &current)],
                );
            }
            ControlType::Button { action } => {
                self.element(
                    "button",
                    &[("type", "button"), ("id", &input_id), ("data-action", action)],
                    &control.label,
                );
            }
            ControlType::Dropdown { options } => {
                self.element("label", &[("for", &input_id)], &control.label);
                self.open("select", &[("id", &input_id)]);
                for option in options {
                    let attrs = [("value", option.value.as_str())];
                    if option.value == current {
                        self.open_with_flags("option", &attrs, &["selected"]);
                    } else {
                        self.open("option", &attrs);
                    }
                    self.text(&option.label);
                    self.close("option");
                }
                self.close("select");
            }
            ControlType::RadioGroup { options } => {
                self.open("fieldset", &[("id", &input_id)]);
                self.element("legend", &[], &control.label);
                for option in options {
                    self.open("label", &[]);
                    let attrs = [
                        ("type", "radio"),
                        ("name", input_id.as_str()),
                        ("value", option.value.as_str()),
                    ];
                    if option.value == current {
                        self.open_with_flags("input", &attrs, &["checked"]);
                    } else {
                        self.open("input", &attrs);
                    }
                    self.text(&option.label);
                    self.close("label");
                }
                self.close("fieldset");
            }
            ControlType::Unknown(unknown) => self.unknown_marker(unknown.display_name()),
        }
        self.close("div");
    }
}
