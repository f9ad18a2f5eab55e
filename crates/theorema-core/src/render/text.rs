use log::warn;

use super::html::css_value;
use super::RenderContext;
use crate::model::{LinkTarget, MathNode, RichTextSegment, TextStyle};
use crate::utils::slugify_heading;

/// Where a link target points inside the site, or `None` when it has no page.
pub(crate) fn link_href(target: &LinkTarget) -> Option<String> {
    match target {
        LinkTarget::Url(url) => Some(url.clone()),
        LinkTarget::InternalPageId(id) => Some(format!("/docs/{id}")),
        LinkTarget::DefinitionId {
            term_id,
            theory_context: Some(theory),
        } => Some(format!("/math/{theory}#definition-{term_id}")),
        LinkTarget::DefinitionId { term_id, .. } => Some(format!("#definition-{term_id}")),
        LinkTarget::DefinitionAspect {
            term_id,
            aspect_id,
            theory_context,
        } => Some(match theory_context {
            Some(theory) => format!("/math/{theory}#definition-{term_id}-{aspect_id}"),
            None => format!("#definition-{term_id}-{aspect_id}"),
        }),
        LinkTarget::TheoremId(id) => Some(format!("#theorem-{id}")),
        LinkTarget::GlossaryTerm(term) => Some(format!("#glossary-{}", slugify_heading(term))),
        LinkTarget::BibliographyKey(key) => Some(format!("#bib-{key}")),
        LinkTarget::InteractiveElementId(id) => Some(format!("#{id}")),
        LinkTarget::TooltipDocument(doc) => Some(format!("#tooltip-{}", doc.id)),
        LinkTarget::ObjectConstructorTemplate { .. }
        | LinkTarget::AnimationTrigger { .. }
        | LinkTarget::Unknown(_) => None,
    }
}

fn target_kind(target: &LinkTarget) -> &str {
    match target {
        LinkTarget::Url(_) => "url",
        LinkTarget::InternalPageId(_) => "page",
        LinkTarget::DefinitionId { .. } => "definition",
        LinkTarget::DefinitionAspect { .. } => "definition-aspect",
        LinkTarget::TheoremId(_) => "theorem",
        LinkTarget::ObjectConstructorTemplate { .. } => "template",
        LinkTarget::GlossaryTerm(_) => "glossary",
        LinkTarget::BibliographyKey(_) => "bibliography",
        LinkTarget::InteractiveElementId(_) => "interactive",
        LinkTarget::TooltipDocument(_) => "tooltip",
        LinkTarget::AnimationTrigger { .. } => "animation",
        LinkTarget::Unknown(_) => "unknown",
    }
}

impl<'a> RenderContext<'a> {
    pub(crate) fn render_rich_text(&mut self, segments: &'a [RichTextSegment]) {
        for segment in segments {
            self.render_segment(segment);
        }
    }

    fn render_segment(&mut self, segment: &'a RichTextSegment) {
        match segment {
            RichTextSegment::Text(text) => self.text(text),
            RichTextSegment::StyledText { text, styles } => self.render_styled(text, styles),
            RichTextSegment::Math(math) => self.render_math(math),
            RichTextSegment::Link {
                content,
                target,
                tooltip,
            } => self.render_link(content, target, tooltip.as_deref()),
            RichTextSegment::FootnoteReference(id) => self.render_footnote_ref(id),
            RichTextSegment::CodeInline(code) => self.element("code", &[], code),
            RichTextSegment::Unknown(unknown) => {
                warn!("Unknown rich text segment '{}'", unknown.display_name());
                if self.config().show_unknown_markers {
                    self.element(
                        "span",
                        &[
                            ("class", "render-marker unknown-content"),
                            ("data-content-type", unknown.display_name()),
                        ],
                        &format!("[{}]", unknown.display_name()),
                    );
                }
            }
        }
    }

    fn render_styled(&mut self, text: &str, styles: &[TextStyle]) {
        let mut tags = Vec::new();
        let mut css = Vec::new();
        for style in styles {
            match style {
                TextStyle::Bold => tags.push("strong"),
                TextStyle::Italic => tags.push("em"),
                TextStyle::Underline => tags.push("u"),
                TextStyle::Strikethrough => tags.push("s"),
                TextStyle::Superscript => tags.push("sup"),
                TextStyle::Subscript => tags.push("sub"),
                TextStyle::Color(value) => css.push(format!("color: {}", css_value(value))),
                TextStyle::BackgroundColor(value) => {
                    css.push(format!("background-color: {}", css_value(value)))
                }
                TextStyle::FontSize(value) => {
                    css.push(format!("font-size: {}", css_value(value)))
                }
                TextStyle::FontFamily(value) => {
                    css.push(format!("font-family: {}", css_value(value)))
                }
            }
        }

        let style = css.join("; ");
        if !css.is_empty() {
            self.open("span", &[("style", &style)]);
        }
        for tag in &tags {
            self.open(tag, &[]);
        }
        self.text(text);
        for tag in tags.iter().rev() {
            self.close(tag);
        }
        if !css.is_empty() {
            self.close("span");
        }
    }

    pub(crate) fn render_math(&mut self, math: &MathNode) {
        if math.is_block() {
            self.element(
                "div",
                &[("class", "math math-display"), ("data-math", &math.content)],
                &math.content,
            );
        } else {
            self.element(
                "span",
                &[("class", "math math-inline"), ("data-math", &math.content)],
                &math.content,
            );
        }
    }

    /// Links never nest: an inner link to the same target collapses to its
    /// text, an inner link elsewhere keeps its target as a data attribute.
    fn render_link(
        &mut self,
        content: &'a [RichTextSegment],
        target: &'a LinkTarget,
        tooltip: Option<&str>,
    ) {
        let key = target.key();
        if self.links.contains(&key) {
            self.render_rich_text(content);
            return;
        }

        if let LinkTarget::TooltipDocument(doc) = target {
            if !self.tooltips.iter().any(|seen| seen.id == doc.id) {
                self.tooltips.push(&**doc);
            }
        }

        let kind = target_kind(target);
        let href = link_href(target);
        let mut attrs: Vec<(&str, &str)> =
            vec![("data-link-kind", kind), ("data-link-target", key.as_str())];
        if let Some(tooltip) = tooltip {
            attrs.push(("title", tooltip));
        }

        let tag = if self.links.is_empty() && href.is_some() {
            "a"
        } else {
            "span"
        };
        let mut all = Vec::with_capacity(attrs.len() + 2);
        all.push(("class", "link"));
        if tag == "a" {
            if let Some(href) = href.as_deref() {
                all.push(("href", href));
            }
        }
        all.extend(attrs);

        self.open(tag, &all);
        self.links.push(key.clone());
        self.render_rich_text(content);
        self.links.pop();
        self.close(tag);
    }

    fn render_footnote_ref(&mut self, id: &str) {
        let number = self
            .current_document()
            .and_then(|doc| doc.footnotes.iter().position(|note| note.id == id))
            .map(|index| (index + 1).to_string())
            .unwrap_or_else(|| "?".to_string());
        let href = format!("#footnote-{id}");
        self.open("sup", &[("class", "footnote-ref")]);
        // Inside a link the reference cannot be an anchor of its own.
        if self.links.is_empty() {
            self.element("a", &[("href", &href), ("data-footnote-id", id)], &number);
        } else {
            self.element("span", &[("data-footnote-id", id)], &number);
        }
        self.close("sup");
    }
}
