use log::warn;

use super::html::{css_value, kebab, script_json};
use super::{RenderContext, SectionMode};
use crate::model::{
    AlertBoxContent, CodeBlockContent, CollapsibleBlockContent, ColumnsContent,
    CustomComponentContent, EmbeddedSectionRef, GridContent, ImageContent,
    InteractiveDiagramContent, MathBlockContent, ParagraphContent, QuoteBlockContent,
    RichTextSegment, Section, SectionContentNode, StructuredMathContent, TextAlignment,
};

impl<'a> RenderContext<'a> {
    pub(crate) fn render_nodes(&mut self, nodes: &'a [SectionContentNode]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    pub(crate) fn render_node(&mut self, node: &'a SectionContentNode) {
        if !self.enter() {
            return;
        }
        match node {
            SectionContentNode::Paragraph(paragraph) => self.render_paragraph(paragraph),
            SectionContentNode::MathBlock(block) => self.render_math_block(block),
            SectionContentNode::StructuredMath(block) => self.render_structured_math(block),
            SectionContentNode::List(list) => self.render_list(list),
            SectionContentNode::Table(table) => self.render_table(table),
            SectionContentNode::CodeBlock(block) => self.render_code_block(block),
            SectionContentNode::Image(image) => self.render_image(image),
            SectionContentNode::InteractiveDiagram(diagram) => self.render_diagram(diagram),
            SectionContentNode::CollapsibleBlock(block) => self.render_collapsible(block),
            SectionContentNode::Grid(grid) => self.render_grid(grid),
            SectionContentNode::Columns(columns) => self.render_columns(columns),
            SectionContentNode::ThematicBreak => self.raw("<hr>"),
            SectionContentNode::QuoteBlock(quote) => self.render_quote(quote),
            SectionContentNode::AlertBox(alert) => self.render_alert(alert),
            SectionContentNode::CustomComponent(component) => {
                self.render_custom_component(component)
            }
            SectionContentNode::EmbeddedSectionRef(reference) => {
                self.render_section_ref(reference)
            }
            SectionContentNode::SubSection(section) => {
                self.section_level += 1;
                self.render_section(section, self.nested_mode(section));
                self.section_level -= 1;
            }
            SectionContentNode::SideBySideLayout(layout) => self.render_side_by_side(layout),
            SectionContentNode::PanelLayout(layout) => self.render_panel_layout(layout),
            SectionContentNode::AnnotationOverlay(overlay) => {
                self.render_annotation_overlay(overlay)
            }
            SectionContentNode::InteractiveControls(controls) => self.render_controls(controls),
            SectionContentNode::EmbeddedDocument(document) => {
                self.render_embedded_document(document)
            }
            SectionContentNode::Unknown(unknown) => self.unknown_marker(unknown.display_name()),
        }
        self.leave();
    }

    pub(crate) fn render_section(&mut self, section: &'a Section, mode: SectionMode) {
        self.render_numbered_section(section, mode, None);
    }

    /// Render a section, prefixing its title with `number` when one is given.
    /// Subsections of a numbered section are numbered `{number}.{k}`.
    pub(crate) fn render_numbered_section(
        &mut self,
        section: &'a Section,
        mode: SectionMode,
        number: Option<String>,
    ) {
        if self.sections.contains(&section.id.as_str()) {
            warn!("Section '{}' references itself", section.id);
            self.marker(
                "section-cycle",
                &[("data-section-id", &section.id)],
                &format!("Section {} is already being displayed", section.id),
            );
            return;
        }

        let options = section.display_options.clone().unwrap_or_default();
        let show_title = match mode {
            SectionMode::Anchored => section.display_options.is_none() || options.show_title,
            SectionMode::Reference { show_title } => show_title,
        };

        let mut class = format!("section level-{}", self.section_level + 1);
        if options.numbered || number.is_some() {
            class.push_str(" numbered");
        }
        if matches!(mode, SectionMode::Reference { .. }) {
            class.push_str(" section-ref");
        }
        if let Some(extra) = &options.css_class {
            class.push(' ');
            class.push_str(extra);
        }

        match mode {
            SectionMode::Anchored => self.open(
                "section",
                &[
                    ("id", &section.id),
                    ("data-section-id", &section.id),
                    ("class", &class),
                ],
            ),
            SectionMode::Reference { .. } => self.open(
                "section",
                &[("data-section-id", &section.id), ("class", &class)],
            ),
        }
        self.sections.push(&section.id);
        let referenced = matches!(mode, SectionMode::Reference { .. });
        if referenced {
            self.in_reference += 1;
        }

        if show_title {
            if let Some(title) = &section.title {
                let heading = format!("h{}", (self.section_level + 2).min(6));
                self.open(&heading, &[("class", "section-title")]);
                if let Some(number) = &number {
                    self.element("span", &[("class", "section-number")], number);
                    self.text(" ");
                }
                self.render_rich_text(title);
                self.close(&heading);
            }
        }

        if let Some(metadata) = &section.metadata {
            if !metadata.is_empty() {
                self.open("dl", &[("class", "section-metadata")]);
                for (key, value) in metadata {
                    self.element("dt", &[], key);
                    self.element("dd", &[], value);
                }
                self.close("dl");
            }
        }

        let mut child_index = 0;
        for node in &section.content {
            match (node, &number) {
                (SectionContentNode::SubSection(child), Some(parent)) => {
                    child_index += 1;
                    if self.enter() {
                        self.section_level += 1;
                        self.render_numbered_section(
                            child,
                            self.nested_mode(child),
                            Some(format!("{parent}.{child_index}")),
                        );
                        self.section_level -= 1;
                        self.leave();
                    }
                }
                _ => self.render_node(node),
            }
        }

        if referenced {
            self.in_reference -= 1;
        }
        self.sections.pop();
        self.close("section");
    }

    /// Subsections of a referenced copy are copies too.
    fn nested_mode(&self, section: &Section) -> SectionMode {
        if self.in_reference == 0 {
            return SectionMode::Anchored;
        }
        SectionMode::Reference {
            show_title: section
                .display_options
                .as_ref()
                .map_or(true, |options| options.show_title),
        }
    }

    fn render_paragraph(&mut self, paragraph: &'a ParagraphContent) {
        match paragraph.alignment.and_then(TextAlignment::as_css) {
            Some(alignment) => {
                let style = format!("text-align: {alignment}");
                self.open("p", &[("style", &style)]);
            }
            None => self.open("p", &[]),
        }
        self.render_rich_text(&paragraph.segments);
        self.close("p");
    }

    fn render_caption(&mut self, caption: &'a Option<Vec<RichTextSegment>>) {
        if let Some(caption) = caption {
            self.open("figcaption", &[]);
            self.render_rich_text(caption);
            self.close("figcaption");
        }
    }

    fn render_math_block(&mut self, block: &'a MathBlockContent) {
        match block.label.as_ref().filter(|_| self.in_reference == 0) {
            Some(label) => {
                let id = format!("eq-{label}");
                self.open(
                    "figure",
                    &[("class", "math-block"), ("id", &id), ("data-label", label)],
                );
            }
            None => self.open("figure", &[("class", "math-block")]),
        }
        self.element(
            "div",
            &[("class", "math math-display"), ("data-math", &block.math.content)],
            &block.math.content,
        );
        if let Some(label) = &block.label {
            self.element("span", &[("class", "equation-label")], &format!("({label})"));
        }
        self.render_caption(&block.caption);
        self.close("figure");
    }

    fn render_structured_math(&mut self, block: &'a StructuredMathContent) {
        let label = block.kind.label();
        let class = format!("structured-math structured-{}", kebab(label));
        self.open("div", &[("class", &class), ("data-kind", label)]);

        self.open("p", &[("class", "structured-math-heading")]);
        let heading = match &block.number {
            Some(number) => format!("{label} {number}"),
            None => label.to_string(),
        };
        self.element("span", &[("class", "structured-math-label")], &heading);
        if let Some(title) = &block.title {
            self.text(" (");
            self.render_rich_text(title);
            self.text(")");
        }
        self.text(".");
        self.close("p");

        self.open("div", &[("class", "structured-math-body")]);
        self.render_nodes(&block.body);
        self.close("div");

        if let Some(proof) = &block.proof {
            self.open("div", &[("class", "proof")]);
            self.element("span", &[("class", "proof-label")], "Proof.");
            self.render_nodes(proof);
            self.element("span", &[("class", "qed")], "\u{220E}");
            self.close("div");
        }
        self.close("div");
    }

    fn render_code_block(&mut self, block: &'a CodeBlockContent) {
        self.open("figure", &[("class", "code-block")]);
        self.open("pre", &[]);
        match &block.language {
            Some(language) => {
                let class = format!("language-{language}");
                self.open("code", &[("class", &class), ("data-language", language)]);
            }
            None => self.open("code", &[]),
        }
        if block.show_line_numbers {
            for (index, line) in block.code.lines().enumerate() {
                let number = (index + 1).to_string();
                self.open("span", &[("class", "code-line"), ("data-line", &number)]);
                self.text(line);
                self.close("span");
                self.raw("\n");
            }
        } else {
            self.text(&block.code);
        }
        self.close("code");
        self.close("pre");
        self.render_caption(&block.caption);
        self.close("figure");
    }

    fn render_image(&mut self, image: &'a ImageContent) {
        let mut style = Vec::new();
        if let Some(width) = &image.width {
            style.push(format!("width: {}", css_value(width)));
        }
        if let Some(height) = &image.height {
            style.push(format!("height: {}", css_value(height)));
        }
        let style = style.join("; ");

        self.open("figure", &[("class", "image")]);
        let mut attrs = vec![("src", image.src.as_str()), ("alt", image.alt.as_str())];
        if !style.is_empty() {
            attrs.push(("style", &style));
        }
        self.open("img", &attrs);
        self.render_caption(&image.caption);
        self.close("figure");
    }

    fn render_diagram(&mut self, diagram: &'a InteractiveDiagramContent) {
        self.open("figure", &[("class", "interactive-diagram")]);
        self.open(
            "div",
            &[
                ("class", "diagram-mount"),
                ("id", &diagram.diagram_id),
                ("data-diagram-type", &diagram.diagram_type),
            ],
        );
        self.open("script", &[("type", "application/json")]);
        self.raw(&script_json(&diagram.data));
        self.close("script");
        self.close("div");
        self.render_caption(&diagram.caption);
        self.close("figure");
    }

    fn render_collapsible(&mut self, block: &'a CollapsibleBlockContent) {
        let collapsed = self.state.is_collapsed(block);
        let attrs = [("class", "collapsible"), ("data-collapsible-id", block.id.as_str())];
        if collapsed {
            self.open("details", &attrs);
        } else {
            self.open_with_flags("details", &attrs, &["open"]);
        }
        self.open("summary", &[]);
        self.render_rich_text(&block.summary);
        self.close("summary");
        self.render_nodes(&block.content);
        self.close("details");
    }

    fn render_grid(&mut self, grid: &'a GridContent) {
        let mut style = vec!["display: grid".to_string()];
        if let Some(columns) = &grid.columns_template {
            style.push(format!("grid-template-columns: {}", css_value(columns)));
        }
        if let Some(rows) = &grid.rows_template {
            style.push(format!("grid-template-rows: {}", css_value(rows)));
        }
        if let Some(gap) = &grid.gap {
            style.push(format!("gap: {}", css_value(gap)));
        }
        let style = style.join("; ");

        self.open("div", &[("class", "content-grid"), ("style", &style)]);
        for item in &grid.items {
            let mut placement = Vec::new();
            if let Some(column) = &item.column {
                placement.push(format!("grid-column: {}", css_value(column)));
            }
            if let Some(row) = &item.row {
                placement.push(format!("grid-row: {}", css_value(row)));
            }
            let placement = placement.join("; ");
            if placement.is_empty() {
                self.open("div", &[("class", "grid-item")]);
            } else {
                self.open("div", &[("class", "grid-item"), ("style", &placement)]);
            }
            self.render_nodes(&item.content);
            self.close("div");
        }
        self.close("div");
    }

    fn render_columns(&mut self, columns: &'a ColumnsContent) {
        let template = columns
            .columns
            .iter()
            .map(|column| {
                column
                    .width
                    .as_deref()
                    .map(css_value)
                    .unwrap_or_else(|| "1fr".to_string())
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut style = format!("display: grid; grid-template-columns: {template}");
        if let Some(gap) = &columns.gap {
            style.push_str(&format!("; gap: {}", css_value(gap)));
        }

        self.open("div", &[("class", "columns"), ("style", &style)]);
        for column in &columns.columns {
            self.open("div", &[("class", "column")]);
            self.render_nodes(&column.content);
            self.close("div");
        }
        self.close("div");
    }

    fn render_quote(&mut self, quote: &'a QuoteBlockContent) {
        self.open("blockquote", &[]);
        self.render_nodes(&quote.content);
        if let Some(attribution) = &quote.attribution {
            self.open("footer", &[("class", "attribution")]);
            self.render_rich_text(attribution);
            self.close("footer");
        }
        self.close("blockquote");
    }

    fn render_alert(&mut self, alert: &'a AlertBoxContent) {
        let class = match alert.alert_type.css_class() {
            Some(kind) => format!("alert {kind}"),
            None => "alert".to_string(),
        };
        self.open("div", &[("class", &class), ("role", "note")]);
        if let Some(title) = &alert.title {
            self.open("p", &[("class", "alert-title")]);
            self.render_rich_text(title);
            self.close("p");
        }
        self.render_nodes(&alert.content);
        self.close("div");
    }

    fn render_custom_component(&mut self, component: &'a CustomComponentContent) {
        let name = component.component_name.as_str();
        if let Some(renderer) = self.renderer.components.get(name) {
            let html = renderer.render(&component.props);
            self.open("div", &[("class", "custom-component"), ("data-component", name)]);
            self.raw(&html);
            self.close("div");
            return;
        }

        match &component.fallback_content {
            Some(fallback) => {
                warn!("No renderer for component '{}', using fallback", name);
                self.open(
                    "div",
                    &[("class", "custom-component fallback"), ("data-component", name)],
                );
                self.render_nodes(fallback);
                self.close("div");
            }
            None => self.unknown_marker(&format!("CustomComponent:{name}")),
        }
    }

    fn render_section_ref(&mut self, reference: &'a EmbeddedSectionRef) {
        let target = self
            .current_document()
            .and_then(|document| document.find_section(&reference.section_id));
        match target {
            Some(section) => self.render_section(
                section,
                SectionMode::Reference {
                    show_title: reference.show_title,
                },
            ),
            None => {
                warn!("Unresolved section reference '{}'", reference.section_id);
                self.marker(
                    "unresolved-ref",
                    &[("data-section-id", &reference.section_id)],
                    &format!("Missing section: {}", reference.section_id),
                );
            }
        }
    }
}
