use log::{debug, warn};

use super::html::kebab;
use super::{RenderContext, SectionMode};
use crate::model::{
    DocumentType, FlexibleDocument, InteractionFeature, LayoutStyle, Section, TocEntry,
};
use crate::utils::slugify_heading;

/// Class and inline style for a generic layout; `Unknown` gets neither.
fn layout_css(style: LayoutStyle) -> Option<(&'static str, &'static str)> {
    match style {
        LayoutStyle::SingleColumn => Some((
            "layout-single-column",
            "max-width: 48rem; margin: 0 auto",
        )),
        LayoutStyle::TwoColumn => Some((
            "layout-two-column",
            "display: grid; grid-template-columns: 1fr 1fr; gap: 2rem",
        )),
        LayoutStyle::Sidebar => Some((
            "layout-sidebar",
            "display: grid; grid-template-columns: 3fr 1fr; gap: 2rem",
        )),
        LayoutStyle::Grid => Some((
            "layout-grid",
            "display: grid; grid-template-columns: repeat(auto-fill, minmax(20rem, 1fr)); gap: 1.5rem",
        )),
        LayoutStyle::Magazine => Some(("layout-magazine", "column-count: 2; column-gap: 2rem")),
        LayoutStyle::Slides => Some(("layout-slides", "display: flex; flex-direction: column")),
        LayoutStyle::Notebook => Some(("layout-notebook", "max-width: 60rem; margin: 0 auto")),
        LayoutStyle::Unknown => None,
    }
}

fn feature_name(feature: InteractionFeature) -> &'static str {
    match feature {
        InteractionFeature::Hover => "hover",
        InteractionFeature::Click => "click",
        InteractionFeature::Expand => "expand",
        InteractionFeature::Search => "search",
        InteractionFeature::Filter => "filter",
        InteractionFeature::Copy => "copy",
        InteractionFeature::Bookmark => "bookmark",
        InteractionFeature::Annotate => "annotate",
    }
}

impl<'a> RenderContext<'a> {
    pub(crate) fn render_document(&mut self, document: &'a FlexibleDocument) {
        if self.documents.iter().any(|open| open.id == document.id) {
            warn!("Document '{}' embeds itself", document.id);
            self.marker(
                "document-cycle",
                &[("data-document-id", &document.id)],
                &format!("Document {} is already being displayed", document.id),
            );
            return;
        }
        debug!(
            "Rendering document '{}' as {}",
            document.id,
            document.document_type.as_str()
        );

        self.documents.push(document);
        let saved_level = self.section_level;
        self.section_level = 0;

        self.open_article(document);
        self.render_header(document);
        self.render_abstract(document);
        self.render_toc(document);
        if document.document_type == DocumentType::Glossary {
            self.render_glossary(document);
        }
        if document.document_type == DocumentType::ResourcePanel {
            self.render_resource_nav(&document.body);
        }
        self.render_body(document);
        self.render_footnotes(document);
        if document.document_type != DocumentType::Glossary {
            self.render_glossary(document);
        }
        self.render_bibliography(document);
        if self.documents.len() == 1 {
            self.render_tooltip_documents();
        }
        self.close("article");

        self.section_level = saved_level;
        self.documents.pop();
    }

    pub(crate) fn render_embedded_document(&mut self, document: &'a FlexibleDocument) {
        self.open("div", &[("class", "embedded-document")]);
        self.render_document(document);
        self.close("div");
    }

    fn open_article(&mut self, document: &'a FlexibleDocument) {
        let doc_type = document.document_type;
        let class = format!("document doc-{}", kebab(doc_type.as_str()));
        let mut attrs: Vec<(&str, String)> = vec![
            ("class", class),
            ("data-document-type", doc_type.as_str().to_string()),
            ("data-document-id", document.id.clone()),
        ];

        if doc_type.is_self_laying_out() {
            attrs.push(("style", "width: 100%".to_string()));
        }
        if let Some(config) = &document.presentation_config {
            attrs.push((
                "data-audience",
                kebab(&format!("{:?}", config.target_audience)),
            ));
            attrs.push((
                "data-formality",
                kebab(&format!("{:?}", config.formality_level)),
            ));
            if !config.interaction_features.is_empty() {
                let features: Vec<&str> = config
                    .interaction_features
                    .iter()
                    .map(|feature| feature_name(*feature))
                    .collect();
                attrs.push(("data-features", features.join(" ")));
            }
            if let Some(animation) = config.animation_config.as_ref().filter(|a| a.enabled) {
                if let Some(duration) = animation.duration_ms {
                    attrs.push(("data-animation-duration", duration.to_string()));
                }
                if let Some(easing) = &animation.easing {
                    attrs.push(("data-animation-easing", easing.clone()));
                }
            }
        }

        let borrowed: Vec<(&str, &str)> = attrs
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.open("article", &borrowed);
    }

    fn render_header(&mut self, document: &'a FlexibleDocument) {
        self.open("header", &[("class", "document-header")]);
        self.element("h1", &[("class", "document-title")], &document.title);
        if !document.authors.is_empty() {
            self.element(
                "p",
                &[("class", "document-authors")],
                &document.authors.join(", "),
            );
        }
        if document.created_at.is_some() || document.updated_at.is_some() {
            self.open("p", &[("class", "document-dates")]);
            if let Some(created) = &document.created_at {
                self.element("time", &[("datetime", created), ("class", "created")], created);
            }
            if let Some(updated) = &document.updated_at {
                if document.created_at.is_some() {
                    self.text(" \u{00B7} ");
                }
                self.text("Updated ");
                self.element("time", &[("datetime", updated), ("class", "updated")], updated);
            }
            self.close("p");
        }
        self.close("header");
    }

    fn render_abstract(&mut self, document: &'a FlexibleDocument) {
        let Some(summary) = &document.abstract_content else {
            return;
        };
        self.open("section", &[("class", "document-abstract")]);
        self.element("h2", &[], "Abstract");
        self.open("p", &[]);
        self.render_rich_text(summary);
        self.close("p");
        self.close("section");
    }

    fn render_toc(&mut self, document: &'a FlexibleDocument) {
        let Some(toc) = &document.table_of_contents else {
            return;
        };
        let entries = if toc.auto_generate {
            document.generated_toc()
        } else {
            toc.entries.clone()
        };
        if entries.is_empty() {
            return;
        }
        self.open("nav", &[("class", "table-of-contents")]);
        self.element("h2", &[], "Contents");
        self.render_toc_entries(&entries);
        self.close("nav");
    }

    fn render_toc_entries(&mut self, entries: &[TocEntry]) {
        self.open("ol", &[]);
        for entry in entries {
            let href = format!("#{}", entry.section_id);
            self.open("li", &[]);
            self.element("a", &[("href", &href)], &entry.title);
            if !entry.children.is_empty() {
                self.render_toc_entries(&entry.children);
            }
            self.close("li");
        }
        self.close("ol");
    }

    fn render_resource_nav(&mut self, sections: &'a [Section]) {
        if sections.is_empty() {
            return;
        }
        self.open("nav", &[("class", "resource-nav")]);
        self.open("ul", &[]);
        for section in sections {
            let href = format!("#{}", section.id);
            let label = section.title_text().unwrap_or_else(|| section.id.clone());
            self.open("li", &[]);
            self.element("a", &[("href", &href)], &label);
            self.close("li");
        }
        self.close("ul");
        self.close("nav");
    }

    fn render_body(&mut self, document: &'a FlexibleDocument) {
        let doc_type = document.document_type;
        let layout = if doc_type.is_self_laying_out() {
            None
        } else {
            let style = document
                .presentation_config
                .as_ref()
                .map(|config| config.layout_style)
                .unwrap_or(self.config().default_layout);
            layout_css(style)
        };

        let columns = format!(
            "display: grid; grid-template-columns: repeat({}, 1fr); gap: 1.5rem",
            document.body.len().max(1)
        );
        let (class, style) = match (doc_type, layout) {
            (DocumentType::ComparisonPage, _) => {
                ("document-body comparison-grid".to_string(), Some(columns.as_str()))
            }
            (DocumentType::TypeMappingDisplay | DocumentType::TransformationMapping, _) => (
                "document-body mapping-grid".to_string(),
                Some("display: grid; grid-template-columns: 1fr auto 1fr; gap: 1rem"),
            ),
            (_, Some((layout_class, layout_style))) => {
                (format!("document-body {layout_class}"), Some(layout_style))
            }
            (_, None) => ("document-body".to_string(), None),
        };

        match style {
            Some(style) => self.open("main", &[("class", &class), ("style", style)]),
            None => self.open("main", &[("class", &class)]),
        }

        match doc_type {
            DocumentType::Textbook => {
                for (index, section) in document.body.iter().enumerate() {
                    self.render_numbered_section(
                        section,
                        SectionMode::Anchored,
                        Some((index + 1).to_string()),
                    );
                }
            }
            DocumentType::ComparisonPage => {
                for section in &document.body {
                    self.open("div", &[("class", "comparison-column")]);
                    self.render_section(section, SectionMode::Anchored);
                    self.close("div");
                }
            }
            DocumentType::AnimatedPresentation => {
                for (index, section) in document.body.iter().enumerate() {
                    let slide = index.to_string();
                    let class = if index == 0 { "slide slide-current" } else { "slide" };
                    self.open("div", &[("class", class), ("data-slide-index", &slide)]);
                    self.render_section(section, SectionMode::Anchored);
                    self.close("div");
                }
            }
            DocumentType::TypeMappingDisplay | DocumentType::TransformationMapping => {
                for pair in document.body.chunks(2) {
                    self.open("div", &[("class", "mapping-source")]);
                    self.render_section(&pair[0], SectionMode::Anchored);
                    self.close("div");
                    self.element("span", &[("class", "mapping-arrow")], "\u{2192}");
                    self.open("div", &[("class", "mapping-target")]);
                    if let Some(target) = pair.get(1) {
                        self.render_section(target, SectionMode::Anchored);
                    }
                    self.close("div");
                }
            }
            _ => {
                for section in &document.body {
                    self.render_section(section, SectionMode::Anchored);
                }
            }
        }
        self.close("main");
    }

    fn render_footnotes(&mut self, document: &'a FlexibleDocument) {
        if document.footnotes.is_empty() {
            return;
        }
        self.open("section", &[("class", "footnotes")]);
        self.open("ol", &[]);
        for note in &document.footnotes {
            let id = format!("footnote-{}", note.id);
            self.open("li", &[("id", &id)]);
            self.render_rich_text(&note.content);
            self.close("li");
        }
        self.close("ol");
        self.close("section");
    }

    fn render_glossary(&mut self, document: &'a FlexibleDocument) {
        if document.glossary.is_empty() {
            return;
        }
        self.open("section", &[("class", "glossary")]);
        self.element("h2", &[], "Glossary");
        self.open("dl", &[]);
        for entry in &document.glossary {
            let id = format!("glossary-{}", slugify_heading(&entry.term));
            self.element("dt", &[("id", &id)], &entry.term);
            self.open("dd", &[]);
            self.render_rich_text(&entry.definition);
            self.close("dd");
        }
        self.close("dl");
        self.close("section");
    }

    fn render_bibliography(&mut self, document: &'a FlexibleDocument) {
        if document.bibliography.is_empty() {
            return;
        }
        self.open("section", &[("class", "bibliography")]);
        self.element("h2", &[], "References");
        self.open("ol", &[]);
        for entry in &document.bibliography {
            let id = format!("bib-{}", entry.key);
            self.open("li", &[("id", &id)]);
            if !entry.authors.is_empty() {
                self.text(&format!("{}. ", entry.authors.join(", ")));
            }
            self.element("cite", &[], &entry.title);
            self.text(".");
            if let Some(venue) = &entry.venue {
                self.text(&format!(" {venue}."));
            }
            if let Some(year) = entry.year {
                self.text(&format!(" {year}."));
            }
            if let Some(url) = &entry.url {
                self.text(" ");
                self.element("a", &[("href", url)], url);
            }
            self.close("li");
        }
        self.close("ol");
        self.close("section");
    }

    /// Tooltip documents collected from links, including ones found while
    /// rendering earlier tooltips.
    fn render_tooltip_documents(&mut self) {
        if self.tooltips.is_empty() {
            return;
        }
        self.open_with_flags("aside", &[("class", "tooltip-documents")], &["hidden"]);
        let mut index = 0;
        while let Some(document) = self.tooltips.get(index).copied() {
            let id = format!("tooltip-{}", document.id);
            self.open("div", &[("class", "tooltip-document"), ("id", &id)]);
            self.render_document(document);
            self.close("div");
            index += 1;
        }
        self.close("aside");
    }
}
