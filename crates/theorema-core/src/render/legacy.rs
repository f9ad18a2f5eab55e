use pulldown_cmark::{html, Event, Options, Parser};

use super::RenderContext;
use crate::loader::Provenance;
use crate::model::{Definition, MathContent, Theorem};
use crate::utils::slugify_identifier;

/// Markdown fragment to HTML. Embedded raw HTML is shown as text.
pub(crate) fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

impl<'a> RenderContext<'a> {
    pub(crate) fn render_math_content(&mut self, content: &MathContent, provenance: &Provenance) {
        self.open(
            "div",
            &[
                ("class", "math-content"),
                ("data-theory", &content.theory),
                ("data-provenance", provenance.label()),
            ],
        );
        self.element("h1", &[("class", "theory-title")], &content.theory);

        if let Provenance::NotFound { tried } = provenance {
            if !tried.is_empty() {
                self.open("details", &[("class", "tried-paths")]);
                self.element("summary", &[], "Paths tried");
                self.open("ul", &[]);
                for path in tried {
                    self.open("li", &[]);
                    self.element("code", &[], path);
                    self.close("li");
                }
                self.close("ul");
                self.close("details");
            }
        }

        self.open("section", &[("class", "definitions")]);
        self.element("h2", &[], "Definitions");
        if content.definitions.is_empty() {
            self.element("p", &[("class", "empty")], "No definitions.");
        }
        for definition in &content.definitions {
            self.render_definition(definition);
        }
        self.close("section");

        self.open("section", &[("class", "theorems")]);
        self.element("h2", &[], "Theorems");
        if content.theorems.is_empty() {
            self.element("p", &[("class", "empty")], "No theorems.");
        }
        for theorem in &content.theorems {
            self.render_theorem(theorem);
        }
        self.close("section");

        self.close("div");
    }

    fn render_definition(&mut self, definition: &Definition) {
        let id = format!("definition-{}", slugify_identifier(&definition.name));
        self.open(
            "article",
            &[("class", "definition"), ("id", &id), ("data-kind", &definition.kind)],
        );
        self.open("h3", &[]);
        self.text(&definition.name);
        self.text(" ");
        self.element("span", &[("class", "definition-kind")], &definition.kind);
        self.close("h3");
        if !definition.docs.is_empty() {
            self.open("div", &[("class", "docs")]);
            self.raw(&markdown_to_html(&definition.docs));
            self.close("div");
        }
        if !definition.members.is_empty() {
            self.open("ul", &[("class", "members")]);
            for member in &definition.members {
                self.open("li", &[]);
                self.element("code", &[], member);
                self.close("li");
            }
            self.close("ul");
        }
        self.close("article");
    }

    fn render_theorem(&mut self, theorem: &Theorem) {
        let id = format!("theorem-{}", slugify_identifier(&theorem.name));
        self.open("article", &[("class", "theorem"), ("id", &id)]);
        self.element("h3", &[], &theorem.name);
        if !theorem.statement.is_empty() {
            self.open("div", &[("class", "statement")]);
            self.raw(&markdown_to_html(&theorem.statement));
            self.close("div");
        }
        if !theorem.description.is_empty() {
            self.open("div", &[("class", "description")]);
            self.raw(&markdown_to_html(&theorem.description));
            self.close("div");
        }
        if !theorem.proof_steps.is_empty() {
            self.open("ol", &[("class", "proof-steps")]);
            for step in &theorem.proof_steps {
                self.open("li", &[]);
                self.raw(&markdown_to_html(step));
                self.close("li");
            }
            self.close("ol");
        }
        if !theorem.tags.is_empty() {
            self.open("ul", &[("class", "tags")]);
            for tag in &theorem.tags {
                self.element("li", &[("class", "tag")], tag);
            }
            self.close("ul");
        }
        self.close("article");
    }
}
