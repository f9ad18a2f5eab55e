//! Transient UI state kept outside the immutable document.
//!
//! Nothing here is persisted; a fresh [`ViewState`] reproduces every
//! component's initial state from the document's own flags.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::model::{
    CollapsibleBlockContent, ControlValue, InteractiveControls, PanelLayout, PanelLayoutType,
};

/// Which panels of a layout are showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    /// Exactly one panel active; `None` only when the layout has no panels.
    Tabs { active: Option<String> },
    /// Each panel open or closed on its own.
    Accordion { open: BTreeSet<String> },
    /// Grid, sidebar and floating layouts show every panel.
    AllVisible,
}

impl PanelState {
    pub fn initial(layout: &PanelLayout) -> Self {
        match layout.layout_type {
            PanelLayoutType::Tabs => {
                let active = layout
                    .panels
                    .iter()
                    .find(|panel| panel.initially_visible)
                    .or_else(|| layout.panels.first())
                    .map(|panel| panel.id.clone());
                Self::Tabs { active }
            }
            PanelLayoutType::Accordion => Self::Accordion {
                open: layout
                    .panels
                    .iter()
                    .filter(|panel| panel.initially_visible)
                    .map(|panel| panel.id.clone())
                    .collect(),
            },
            PanelLayoutType::Grid { .. }
            | PanelLayoutType::Sidebar { .. }
            | PanelLayoutType::FloatingPanels
            | PanelLayoutType::Unknown(_) => Self::AllVisible,
        }
    }

    pub fn is_visible(&self, panel_id: &str) -> bool {
        match self {
            Self::Tabs { active } => active.as_deref() == Some(panel_id),
            Self::Accordion { open } => open.contains(panel_id),
            Self::AllVisible => true,
        }
    }
}

/// Emitted when a control changes. Delivering it to the targets is the
/// caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChange {
    pub control_id: String,
    pub value: ControlValue,
    pub target_content_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    panels: HashMap<String, PanelState>,
    collapsed: HashMap<String, bool>,
    controls: HashMap<String, ControlValue>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel_state(&self, layout: &PanelLayout) -> PanelState {
        self.panels
            .get(&layout.id)
            .cloned()
            .unwrap_or_else(|| PanelState::initial(layout))
    }

    /// Activate a tab. Ignored for unknown panel ids and non-tab layouts.
    pub fn select_tab(&mut self, layout: &PanelLayout, panel_id: &str) -> bool {
        if layout.layout_type != PanelLayoutType::Tabs
            || !layout.panels.iter().any(|panel| panel.id == panel_id)
        {
            debug!("Ignoring tab selection '{}' on '{}'", panel_id, layout.id);
            return false;
        }
        self.panels.insert(
            layout.id.clone(),
            PanelState::Tabs {
                active: Some(panel_id.to_string()),
            },
        );
        true
    }

    /// Flip one accordion panel; returns whether it is now open.
    pub fn toggle_panel(&mut self, layout: &PanelLayout, panel_id: &str) -> Option<bool> {
        if layout.layout_type != PanelLayoutType::Accordion
            || !layout.panels.iter().any(|panel| panel.id == panel_id)
        {
            return None;
        }
        let state = self
            .panels
            .entry(layout.id.clone())
            .or_insert_with(|| PanelState::initial(layout));
        let PanelState::Accordion { open } = state else {
            return None;
        };
        if open.remove(panel_id) {
            Some(false)
        } else {
            open.insert(panel_id.to_string());
            Some(true)
        }
    }

    pub fn is_collapsed(&self, block: &CollapsibleBlockContent) -> bool {
        self.collapsed
            .get(&block.id)
            .copied()
            .unwrap_or(block.initially_collapsed)
    }

    /// Flip a collapsible block; returns whether it is now collapsed.
    pub fn toggle_collapsible(&mut self, block: &CollapsibleBlockContent) -> bool {
        let collapsed = !self.is_collapsed(block);
        self.collapsed.insert(block.id.clone(), collapsed);
        collapsed
    }

    pub fn control_value(&self, controls: &InteractiveControls, control_id: &str) -> Option<ControlValue> {
        if let Some(value) = self.controls.get(&control_key(&controls.id, control_id)) {
            return Some(value.clone());
        }
        controls
            .controls
            .iter()
            .find(|control| control.id == control_id)
            .map(|control| control.seed_value())
    }

    /// Store a new value and describe the change for the caller to propagate.
    pub fn change_control(
        &mut self,
        controls: &InteractiveControls,
        control_id: &str,
        value: ControlValue,
    ) -> Option<ControlChange> {
        let control = controls
            .controls
            .iter()
            .find(|control| control.id == control_id)?;
        self.controls
            .insert(control_key(&controls.id, control_id), value.clone());
        Some(ControlChange {
            control_id: control.id.clone(),
            value,
            target_content_ids: control.target_content_ids.clone(),
        })
    }
}

fn control_key(group_id: &str, control_id: &str) -> String {
    format!("{group_id}/{control_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Control, ControlType, ControlsLayout, Panel};

    fn panel(id: &str, initially_visible: bool) -> Panel {
        Panel {
            id: id.to_string(),
            title: None,
            content: Vec::new(),
            initially_visible,
        }
    }

    fn layout(layout_type: PanelLayoutType, panels: Vec<Panel>) -> PanelLayout {
        PanelLayout {
            id: "layout".to_string(),
            panels,
            layout_type,
        }
    }

    #[test]
    fn test_tabs_initial_prefers_visible_flag() {
        let tabs = layout(
            PanelLayoutType::Tabs,
            vec![panel("a", false), panel("b", true), panel("c", true)],
        );
        assert_eq!(
            PanelState::initial(&tabs),
            PanelState::Tabs {
                active: Some("b".to_string())
            }
        );
    }

    #[test]
    fn test_tabs_initial_defaults_to_first() {
        let tabs = layout(PanelLayoutType::Tabs, vec![panel("a", false), panel("b", false)]);
        assert!(PanelState::initial(&tabs).is_visible("a"));
    }

    #[test]
    fn test_tabs_exactly_one_active_after_clicks() {
        let tabs = layout(
            PanelLayoutType::Tabs,
            vec![panel("a", false), panel("b", false), panel("c", false)],
        );
        let mut state = ViewState::new();
        let clicks = ["b", "a", "c", "b", "c", "a", "b"];
        for click in clicks {
            assert!(state.select_tab(&tabs, click));
            let current = state.panel_state(&tabs);
            let visible: Vec<&str> = ["a", "b", "c"]
                .into_iter()
                .filter(|id| current.is_visible(id))
                .collect();
            assert_eq!(visible, vec![click]);
        }
        assert!(!state.select_tab(&tabs, "zzz"));
        assert!(state.panel_state(&tabs).is_visible("b"));
    }

    #[test]
    fn test_accordion_panels_are_independent() {
        let accordion = layout(
            PanelLayoutType::Accordion,
            vec![panel("a", true), panel("b", true), panel("c", false)],
        );
        let mut state = ViewState::new();
        assert_eq!(state.toggle_panel(&accordion, "a"), Some(false));
        let current = state.panel_state(&accordion);
        assert!(!current.is_visible("a"));
        assert!(current.is_visible("b"));
        assert!(!current.is_visible("c"));

        assert_eq!(state.toggle_panel(&accordion, "c"), Some(true));
        let current = state.panel_state(&accordion);
        assert!(current.is_visible("b"));
        assert!(current.is_visible("c"));
    }

    #[test]
    fn test_toggle_ignored_on_tabs() {
        let tabs = layout(PanelLayoutType::Tabs, vec![panel("a", false)]);
        assert_eq!(ViewState::new().toggle_panel(&tabs, "a"), None);
    }

    #[test]
    fn test_control_change_names_targets() {
        let controls = InteractiveControls {
            id: "params".to_string(),
            controls: vec![Control {
                id: "n".to_string(),
                label: "Order".to_string(),
                control_type: ControlType::Slider {
                    min: 1.0,
                    max: 12.0,
                    step: 1.0,
                },
                default_value: Some(ControlValue::Number(4.0)),
                target_content_ids: vec!["cayley-table".to_string()],
            }],
            layout: ControlsLayout::Horizontal,
        };
        let mut state = ViewState::new();
        assert_eq!(
            state.control_value(&controls, "n"),
            Some(ControlValue::Number(4.0))
        );

        let change = state
            .change_control(&controls, "n", ControlValue::Number(6.0))
            .unwrap();
        assert_eq!(change.control_id, "n");
        assert_eq!(change.target_content_ids, vec!["cayley-table"]);
        assert_eq!(
            state.control_value(&controls, "n"),
            Some(ControlValue::Number(6.0))
        );
        assert!(state
            .change_control(&controls, "missing", ControlValue::Bool(true))
            .is_none());
    }

    #[test]
    fn test_collapsible_toggle() {
        let block = CollapsibleBlockContent {
            id: "proof".to_string(),
            summary: Vec::new(),
            content: Vec::new(),
            initially_collapsed: true,
        };
        let mut state = ViewState::new();
        assert!(state.is_collapsed(&block));
        assert!(!state.toggle_collapsible(&block));
        assert!(!state.is_collapsed(&block));
    }
}
