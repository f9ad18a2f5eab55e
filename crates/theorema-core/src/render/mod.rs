//! Document -> HTML dispatch.
//!
//! Rendering is a pure walk over the value tree: the same document and view
//! state always produce the same string. Nothing here fails; unknown or
//! unresolvable content becomes a visible marker.

use std::collections::HashMap;

use log::warn;

use crate::config::RenderConfig;
use crate::loader::LoadOutcome;
use crate::model::{FlexibleDocument, MathContent, Section, SectionContentNode};
use crate::state::ViewState;

mod content;
mod document;
mod html;
mod layout;
mod legacy;
mod list;
mod table;
mod text;

#[cfg(test)]
mod tests;

pub use html::{escape_html, kebab};
pub use list::format_marker;

use html::escape_html as esc;

/// Renders a named custom component from its JSON props.
pub trait ComponentRenderer: Send + Sync {
    fn render(&self, props: &serde_json::Value) -> String;
}

impl<F> ComponentRenderer for F
where
    F: Fn(&serde_json::Value) -> String + Send + Sync,
{
    fn render(&self, props: &serde_json::Value) -> String {
        self(props)
    }
}

pub struct Renderer {
    config: RenderConfig,
    components: HashMap<String, Box<dyn ComponentRenderer>>,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            components: HashMap::new(),
        }
    }

    pub fn register_component(
        &mut self,
        name: impl Into<String>,
        component: impl ComponentRenderer + 'static,
    ) {
        self.components.insert(name.into(), Box::new(component));
    }

    pub fn with_component(
        mut self,
        name: impl Into<String>,
        component: impl ComponentRenderer + 'static,
    ) -> Self {
        self.register_component(name, component);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render_document(&self, document: &FlexibleDocument, state: &ViewState) -> String {
        let mut ctx = RenderContext::new(self, state);
        ctx.render_document(document);
        ctx.finish()
    }

    /// Render one section in the context of its document.
    pub fn render_section(
        &self,
        document: &FlexibleDocument,
        section: &Section,
        state: &ViewState,
    ) -> String {
        let mut ctx = RenderContext::new(self, state);
        ctx.documents.push(document);
        ctx.render_section(section, SectionMode::Anchored);
        ctx.finish()
    }

    /// Render a node with no enclosing document; section references stay unresolved.
    pub fn render_node(&self, node: &SectionContentNode, state: &ViewState) -> String {
        let mut ctx = RenderContext::new(self, state);
        ctx.render_node(node);
        ctx.finish()
    }

    /// Definitions and theorems of one theory, tagged with how they were loaded.
    pub fn render_math_content(&self, outcome: &LoadOutcome<MathContent>) -> String {
        let state = ViewState::new();
        let mut ctx = RenderContext::new(self, &state);
        ctx.render_math_content(&outcome.value, &outcome.provenance);
        ctx.finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionMode {
    /// A section of the body: emits its `id` anchor.
    Anchored,
    /// A copy pulled in by reference: no `id`, so anchors stay unique.
    Reference { show_title: bool },
}

/// Accumulated output and the stacks needed while walking one tree.
pub(crate) struct RenderContext<'a> {
    renderer: &'a Renderer,
    state: &'a ViewState,
    out: String,
    depth: usize,
    section_level: usize,
    /// Nesting count of referenced copies; anchors are only emitted at zero.
    in_reference: usize,
    documents: Vec<&'a FlexibleDocument>,
    sections: Vec<&'a str>,
    links: Vec<String>,
    tooltips: Vec<&'a FlexibleDocument>,
}

impl<'a> RenderContext<'a> {
    fn new(renderer: &'a Renderer, state: &'a ViewState) -> Self {
        Self {
            renderer,
            state,
            out: String::new(),
            depth: 0,
            section_level: 0,
            in_reference: 0,
            documents: Vec::new(),
            sections: Vec::new(),
            links: Vec::new(),
            tooltips: Vec::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn config(&self) -> &RenderConfig {
        &self.renderer.config
    }

    pub(crate) fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&esc(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    /// Boolean attributes (`hidden`, `open`, `checked`) written bare.
    pub(crate) fn open_with_flags(&mut self, tag: &str, attrs: &[(&str, &str)], flags: &[&str]) {
        self.open(tag, attrs);
        if flags.is_empty() {
            return;
        }
        self.out.pop();
        for flag in flags {
            self.out.push(' ');
            self.out.push_str(flag);
        }
        self.out.push('>');
    }

    pub(crate) fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    pub(crate) fn text(&mut self, text: &str) {
        self.out.push_str(&esc(text));
    }

    pub(crate) fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.open(tag, attrs);
        self.text(text);
        self.close(tag);
    }

    pub(crate) fn raw(&mut self, html: &str) {
        self.out.push_str(html);
    }

    /// Visible, non-fatal stand-in for content that cannot be rendered.
    pub(crate) fn marker(&mut self, class: &str, attrs: &[(&str, &str)], message: &str) {
        let class = format!("render-marker {class}");
        let mut all = vec![("class", class.as_str())];
        all.extend_from_slice(attrs);
        self.element("div", &all, message);
    }

    pub(crate) fn unknown_marker(&mut self, type_name: &str) {
        warn!("Unknown content type '{}'", type_name);
        if self.config().show_unknown_markers {
            self.marker(
                "unknown-content",
                &[("data-content-type", type_name)],
                &format!("Unknown content type: {type_name}"),
            );
        }
    }

    /// Enter one level of nesting, or render the depth marker and refuse.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.config().max_depth {
            warn!("Render depth limit {} reached", self.config().max_depth);
            self.marker("depth-limit", &[], "Content nested too deeply to display");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    fn current_document(&self) -> Option<&'a FlexibleDocument> {
        self.documents.last().copied()
    }
}
