use serde_json::json;

use super::*;
use crate::config::RenderConfig;
use crate::loader::{LoadOutcome, Provenance};
use crate::model::{
    Definition, DocumentType, EmbeddedSectionRef, FlexibleDocument, Footnote, GlossaryEntry,
    LinkTarget,
    ListContent, ListItem, ListStyle, MathContent, OrderedListStyle, Panel, PanelLayout,
    PanelLayoutType, QuoteBlockContent, RichTextSegment, Section, SectionContentNode,
};
use crate::state::ViewState;

fn doc(document_type: DocumentType, body: Vec<Section>) -> FlexibleDocument {
    FlexibleDocument::new("doc-1", "Groups", document_type).with_body(body)
}

fn render(document: &FlexibleDocument) -> String {
    Renderer::default().render_document(document, &ViewState::new())
}

fn main_inner(html: &str) -> &str {
    let open = html.find("<main").unwrap();
    let start = open + html[open..].find('>').unwrap() + 1;
    let end = html.find("</main>").unwrap();
    &html[start..end]
}

#[test]
fn test_every_document_type_tags_its_wrapper() {
    let types = [
        DocumentType::Documentation,
        DocumentType::Tutorial,
        DocumentType::Reference,
        DocumentType::Article,
        DocumentType::BlogPost,
        DocumentType::MathematicalContent,
        DocumentType::Lecture,
        DocumentType::InteractiveDemo,
        DocumentType::Glossary,
        DocumentType::Textbook,
        DocumentType::ResourcePanel,
        DocumentType::AnimatedPresentation,
        DocumentType::ComparisonPage,
        DocumentType::TypeMappingDisplay,
        DocumentType::TransformationMapping,
    ];
    for document_type in types {
        let html = render(&doc(document_type, vec![Section::new("intro").with_title("Intro")]));
        let expected = format!("data-document-type=\"{}\"", document_type.as_str());
        assert!(html.contains(&expected), "{html}");
        assert!(html.contains("data-document-id=\"doc-1\""));
        assert!(html.contains("id=\"intro\""));
    }
}

#[test]
fn test_unknown_document_type_uses_passthrough() {
    let document: FlexibleDocument = serde_json::from_value(json!({
        "id": "future",
        "title": "From the future",
        "document_type": "HolographicNotebook",
        "body": [{ "id": "s", "content": [] }]
    }))
    .unwrap();
    assert_eq!(document.document_type, DocumentType::Unknown);

    let html = render(&document);
    assert!(html.contains("data-document-type=\"Unknown\""));
    assert!(html.contains("id=\"s\""));
}

#[test]
fn test_self_laying_out_types_take_full_width() {
    let html = render(&doc(DocumentType::Textbook, Vec::new()));
    assert!(html.contains("style=\"width: 100%\""));
    assert!(!html.contains("layout-single-column"));

    let html = render(&doc(DocumentType::Article, Vec::new()));
    assert!(!html.contains("width: 100%"));
    assert!(html.contains("layout-single-column"));
}

#[test]
fn test_unknown_layout_style_degrades_to_no_styling() {
    let document: FlexibleDocument = serde_json::from_value(json!({
        "id": "d",
        "title": "T",
        "document_type": "Article",
        "presentation_config": { "layout_style": "Hexagonal" }
    }))
    .unwrap();
    let html = render(&document);
    assert!(html.contains("<main class=\"document-body\">"));
}

#[test]
fn test_empty_body_yields_empty_main() {
    for document_type in [
        DocumentType::Article,
        DocumentType::ComparisonPage,
        DocumentType::ResourcePanel,
    ] {
        let html = render(&doc(document_type, Vec::new()));
        assert_eq!(main_inner(&html), "", "{html}");
        assert!(html.contains("document-title"));
    }
}

#[test]
fn test_ids_preserved_at_depth_three() {
    let innermost = Section::new("normal-subgroups")
        .with_title("Normal subgroups")
        .with_content(vec![SectionContentNode::text("Kernels are normal.")]);
    let middle = Section::new("subgroups")
        .with_title("Subgroups")
        .with_content(vec![SectionContentNode::SubSection(innermost)]);
    let outer = Section::new("groups")
        .with_title("Groups")
        .with_content(vec![SectionContentNode::SubSection(middle)]);

    let html = render(&doc(DocumentType::Article, vec![outer]));
    for id in ["groups", "subgroups", "normal-subgroups"] {
        assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        assert!(html.contains(&format!("data-section-id=\"{id}\"")));
    }
    assert!(html.contains("<h4 class=\"section-title\">Normal subgroups</h4>"));
}

#[test]
fn test_textbook_numbers_sections() {
    let chapter = Section::new("ch1")
        .with_title("Groups")
        .with_content(vec![SectionContentNode::SubSection(
            Section::new("ch1-1").with_title("Axioms"),
        )]);
    let html = render(&doc(DocumentType::Textbook, vec![chapter]));
    assert!(html.contains("<span class=\"section-number\">1</span>"));
    assert!(html.contains("<span class=\"section-number\">1.1</span>"));
}

#[test]
fn test_rendering_is_idempotent() {
    let document: FlexibleDocument = serde_json::from_value(json!({
        "id": "d",
        "title": "Cosets",
        "document_type": "Lecture",
        "footnotes": [{ "id": "n1", "content": [{ "type": "Text", "content": "See Lang." }] }],
        "body": [{
            "id": "s",
            "title": [{ "type": "Text", "content": "Cosets" }],
            "content": [
                { "type": "Paragraph", "content": { "segments": [
                    { "type": "Text", "content": "Let " },
                    { "type": "Math", "content": { "content": "H \\le G" } },
                    { "type": "FootnoteReference", "content": "n1" }
                ] } },
                { "type": "ThematicBreak" }
            ]
        }]
    }))
    .unwrap();
    let renderer = Renderer::default();
    let state = ViewState::new();
    let first = renderer.render_document(&document, &state);
    let second = renderer.render_document(&document, &state);
    assert_eq!(first, second);
    assert!(first.contains("class=\"math math-inline\""));
    assert!(first.contains("href=\"#footnote-n1\""));
    assert!(first.contains("<hr>"));
}

#[test]
fn test_roman_lower_list_markers() {
    let list = SectionContentNode::List(ListContent {
        items: (0..3)
            .map(|i| ListItem {
                content: vec![SectionContentNode::text(format!("item {i}"))],
            })
            .collect(),
        style: ListStyle::Ordered(OrderedListStyle::RomanLower),
        start_index: None,
    });
    let html = Renderer::default().render_node(&list, &ViewState::new());
    let markers: Vec<&str> = html
        .split("<span class=\"list-marker\">")
        .skip(1)
        .map(|rest| &rest[..rest.find('<').unwrap()])
        .collect();
    assert_eq!(markers, vec!["i.", "ii.", "iii."]);
    assert!(html.starts_with("<ol class=\"list list-roman-lower\" style=\"list-style: none\">"));
}

#[test]
fn test_unknown_node_renders_marker() {
    let section: Section = serde_json::from_value(json!({
        "id": "s",
        "content": [
            { "type": "Paragraph", "content": { "segments": [{ "type": "Text", "content": "before" }] } },
            { "type": "HolographicProjection", "content": { "angle": 30 } },
            { "type": "Paragraph", "content": { "segments": [{ "type": "Text", "content": "after" }] } }
        ]
    }))
    .unwrap();
    let document = doc(DocumentType::Article, vec![section]);
    let html = render(&document);

    assert!(html.contains("data-content-type=\"HolographicProjection\""));
    let before = html.find("before").unwrap();
    let marker = html.find("unknown-content").unwrap();
    let after = html.find("after").unwrap();
    assert!(before < marker && marker < after);
}

#[test]
fn test_unknown_markers_can_be_hidden() {
    let node: SectionContentNode =
        serde_json::from_value(json!({ "type": "Hologram", "content": null })).unwrap();
    let renderer = Renderer::new(RenderConfig {
        show_unknown_markers: false,
        ..RenderConfig::default()
    });
    assert_eq!(renderer.render_node(&node, &ViewState::new()), "");
}

#[test]
fn test_tabs_render_single_active_panel() {
    let layout = PanelLayout {
        id: "views".to_string(),
        panels: ["algebraic", "geometric", "categorical"]
            .into_iter()
            .map(|id| Panel {
                id: id.to_string(),
                title: None,
                content: vec![SectionContentNode::text(id)],
                initially_visible: false,
            })
            .collect(),
        layout_type: PanelLayoutType::Tabs,
    };
    let node = SectionContentNode::PanelLayout(layout.clone());
    let renderer = Renderer::default();

    let mut state = ViewState::new();
    for selected in ["geometric", "categorical", "algebraic"] {
        state.select_tab(&layout, selected);
        let html = renderer.render_node(&node, &state);
        assert_eq!(html.matches("panel-active").count(), 1);
        assert_eq!(html.matches(" hidden>").count(), 2);
        let active = format!("class=\"panel tab-panel panel-active\" id=\"panel-{selected}\"");
        assert!(html.contains(&active), "{html}");
    }
}

#[test]
fn test_accordion_renders_open_flags() {
    let layout = PanelLayout {
        id: "faq".to_string(),
        panels: vec![
            Panel {
                id: "a".to_string(),
                title: None,
                content: Vec::new(),
                initially_visible: true,
            },
            Panel {
                id: "b".to_string(),
                title: None,
                content: Vec::new(),
                initially_visible: true,
            },
        ],
        layout_type: PanelLayoutType::Accordion,
    };
    let mut state = ViewState::new();
    state.toggle_panel(&layout, "a");
    let html = Renderer::default()
        .render_node(&SectionContentNode::PanelLayout(layout), &state);
    assert!(html.contains("data-panel-id=\"a\" data-open=\"false\""));
    assert!(html.contains("data-panel-id=\"b\" data-open=\"true\""));
}

#[test]
fn test_depth_limit_renders_marker() {
    let mut node = SectionContentNode::text("leaf-payload");
    for _ in 0..6 {
        node = SectionContentNode::QuoteBlock(QuoteBlockContent {
            content: vec![node],
            attribution: None,
        });
    }
    let renderer = Renderer::new(RenderConfig {
        max_depth: 3,
        ..RenderConfig::default()
    });
    let html = renderer.render_node(&node, &ViewState::new());
    assert!(html.contains("depth-limit"));
    assert!(!html.contains("leaf-payload"));
    assert_eq!(html.matches("<blockquote>").count(), 3);
}

#[test]
fn test_section_reference_cycle_is_refused() {
    let section = Section::new("loop").with_content(vec![SectionContentNode::EmbeddedSectionRef(
        EmbeddedSectionRef {
            section_id: "loop".to_string(),
            show_title: true,
        },
    )]);
    let html = render(&doc(DocumentType::Article, vec![section]));
    assert!(html.contains("section-cycle"));
}

#[test]
fn test_section_reference_copy_has_no_anchor() {
    let target = Section::new("lagrange")
        .with_title("Lagrange")
        .with_content(vec![SectionContentNode::text("|H| divides |G|")]);
    let referrer = Section::new("recap").with_content(vec![SectionContentNode::EmbeddedSectionRef(
        EmbeddedSectionRef {
            section_id: "lagrange".to_string(),
            show_title: false,
        },
    )]);
    let html = render(&doc(DocumentType::Article, vec![target, referrer]));
    assert_eq!(html.matches(" id=\"lagrange\"").count(), 1);
    assert_eq!(html.matches("|H| divides |G|").count(), 2);
    assert_eq!(html.matches(">Lagrange</h2>").count(), 1);
}

#[test]
fn test_nested_link_to_same_target_collapses() {
    let target = LinkTarget::InternalPageId("groups".to_string());
    let inner = RichTextSegment::Link {
        content: vec![RichTextSegment::text("groups")],
        target: target.clone(),
        tooltip: None,
    };
    let outer = SectionContentNode::paragraph(vec![RichTextSegment::Link {
        content: vec![RichTextSegment::text("see "), inner],
        target,
        tooltip: Some("Group theory".to_string()),
    }]);
    let html = Renderer::default().render_node(&outer, &ViewState::new());
    assert_eq!(html.matches("<a ").count(), 1);
    assert!(html.contains("href=\"/docs/groups\""));
    assert!(html.contains("title=\"Group theory\""));
}

#[test]
fn test_glossary_links_match_entry_anchors() {
    let mut document = doc(
        DocumentType::Article,
        vec![Section::new("intro").with_content(vec![SectionContentNode::paragraph(vec![
            RichTextSegment::Link {
                content: vec![RichTextSegment::text("normal subgroups")],
                target: LinkTarget::GlossaryTerm("Normal Subgroup".to_string()),
                tooltip: None,
            },
        ])])],
    );
    document.glossary.push(GlossaryEntry {
        term: "Normal Subgroup".to_string(),
        definition: vec![RichTextSegment::text("Closed under conjugation.")],
    });
    let html = render(&document);
    assert!(html.contains("href=\"#glossary-normal-subgroup\""));
    assert!(html.contains("id=\"glossary-normal-subgroup\""));
}

#[test]
fn test_tooltip_documents_rendered_once() {
    let tooltip = FlexibleDocument::new("tip", "Coset", DocumentType::Glossary);
    let link = |text: &str| RichTextSegment::Link {
        content: vec![RichTextSegment::text(text)],
        target: LinkTarget::TooltipDocument(Box::new(tooltip.clone())),
        tooltip: None,
    };
    let section = Section::new("s").with_content(vec![SectionContentNode::paragraph(vec![
        link("cosets"),
        RichTextSegment::text(" and "),
        link("more cosets"),
    ])]);
    let html = render(&doc(DocumentType::Article, vec![section]));
    assert_eq!(html.matches("id=\"tooltip-tip\"").count(), 1);
    assert!(html.contains("<aside class=\"tooltip-documents\" hidden>"));
}

#[test]
fn test_custom_component_registry_and_fallback() {
    let renderer = Renderer::default().with_component("Counter", |props: &serde_json::Value| {
        format!("<output>{}</output>", props["start"])
    });
    let registered: SectionContentNode = serde_json::from_value(json!({
        "type": "CustomComponent",
        "content": { "component_name": "Counter", "props": { "start": 3 } }
    }))
    .unwrap();
    let fallback: SectionContentNode = serde_json::from_value(json!({
        "type": "CustomComponent",
        "content": {
            "component_name": "Plotter",
            "fallback_content": [
                { "type": "Paragraph", "content": { "segments": [{ "type": "Text", "content": "no plot" }] } }
            ]
        }
    }))
    .unwrap();
    let missing: SectionContentNode = serde_json::from_value(json!({
        "type": "CustomComponent",
        "content": { "component_name": "Plotter" }
    }))
    .unwrap();

    let state = ViewState::new();
    assert!(renderer
        .render_node(&registered, &state)
        .contains("<output>3</output>"));
    assert!(renderer.render_node(&fallback, &state).contains("no plot"));
    assert!(renderer
        .render_node(&missing, &state)
        .contains("data-content-type=\"CustomComponent:Plotter\""));
}

#[test]
fn test_text_is_escaped() {
    let node = SectionContentNode::text("<script>alert(1)</script>");
    let html = Renderer::default().render_node(&node, &ViewState::new());
    assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
}

#[test]
fn test_math_content_carries_provenance() {
    let outcome = LoadOutcome {
        value: MathContent {
            theory: "Ring Theory (Not Found)".to_string(),
            definitions: vec![Definition {
                name: "Ring Theory (Not Found)".to_string(),
                docs: "Tried **4** locations.".to_string(),
                kind: "Placeholder".to_string(),
                members: Vec::new(),
            }],
            theorems: Vec::new(),
        },
        provenance: Provenance::NotFound {
            tried: vec!["/theories/ring_theory/definitions.json".to_string()],
        },
    };
    let html = Renderer::default().render_math_content(&outcome);
    assert!(html.contains("data-provenance=\"not-found\""));
    assert!(html.contains("<strong>4</strong>"));
    assert!(html.contains("No theorems."));
    assert!(html.contains("/theories/ring_theory/definitions.json"));
}

fn node_from(value: serde_json::Value) -> SectionContentNode {
    serde_json::from_value(value).unwrap()
}

fn render_value(value: serde_json::Value) -> String {
    Renderer::default().render_node(&node_from(value), &ViewState::new())
}

#[test]
fn test_every_node_variant_deserializes_and_renders() {
    let text = |s: &str| json!([{ "type": "Text", "content": s }]);
    let cases = vec![
        (
            json!({ "type": "Paragraph", "content": { "segments": text("Hello"), "alignment": "Center" } }),
            vec!["<p style=\"text-align: center\">Hello</p>"],
        ),
        (
            json!({ "type": "MathBlock", "content": { "math": { "content": "a^2+b^2=c^2" }, "label": "pyth" } }),
            vec!["class=\"math-block\" id=\"eq-pyth\"", "data-math=\"a^2+b^2=c^2\""],
        ),
        (
            json!({ "type": "StructuredMath", "content": { "kind": "Theorem", "number": "2.1", "body": [], "proof": [] } }),
            vec!["structured-math structured-theorem", "Theorem 2.1", "class=\"qed\""],
        ),
        (
            json!({ "type": "List", "content": {
                "items": [{ "content": [] }],
                "style": { "type": "Unordered", "content": "Square" }
            } }),
            vec!["list list-square", "\u{25AA}"],
        ),
        (
            json!({ "type": "Table", "content": {
                "header_rows": [{ "cells": [{ "content": [] }] }],
                "body_rows": [{ "cells": [{ "content": [], "col_span": 2, "row_span": 3, "alignment": "Right" }] }]
            } }),
            vec!["<thead><tr><th>", "colspan=\"2\"", "rowspan=\"3\"", "text-align: right"],
        ),
        (
            json!({ "type": "CodeBlock", "content": {
                "code": "let x = 1;\nlet y = 2;", "language": "rust", "show_line_numbers": true
            } }),
            vec!["class=\"language-rust\"", "data-line=\"2\""],
        ),
        (
            json!({ "type": "Image", "content": { "src": "/img/cayley.png", "alt": "Cayley table", "width": "320px" } }),
            vec!["src=\"/img/cayley.png\"", "alt=\"Cayley table\"", "style=\"width: 320px\""],
        ),
        (
            json!({ "type": "InteractiveDiagram", "content": {
                "diagram_id": "d1", "diagram_type": "graph", "data": { "nodes": [1, 2] }
            } }),
            vec!["id=\"d1\"", "data-diagram-type=\"graph\"", "{\"nodes\":[1,2]}"],
        ),
        (
            json!({ "type": "CollapsibleBlock", "content": {
                "id": "c1", "summary": text("More"), "initially_collapsed": true
            } }),
            vec!["<details class=\"collapsible\" data-collapsible-id=\"c1\"><summary>More</summary>"],
        ),
        (
            json!({ "type": "Grid", "content": {
                "items": [{ "content": [], "column": "1 / span 2", "row": "2" }],
                "columns_template": "repeat(3, 1fr)",
                "gap": "1rem"
            } }),
            vec![
                "grid-template-columns: repeat(3, 1fr)",
                "gap: 1rem",
                "style=\"grid-column: 1 / span 2; grid-row: 2\"",
            ],
        ),
        (
            json!({ "type": "Columns", "content": { "columns": [{ "content": [], "width": "2fr" }, { "content": [] }] } }),
            vec!["grid-template-columns: 2fr 1fr"],
        ),
        (json!({ "type": "ThematicBreak" }), vec!["<hr>"]),
        (
            json!({ "type": "QuoteBlock", "content": { "content": [], "attribution": text("Euler") } }),
            vec!["<footer class=\"attribution\">Euler</footer>"],
        ),
        (
            json!({ "type": "AlertBox", "content": { "alert_type": "Tip", "content": [] } }),
            vec!["class=\"alert alert-tip\""],
        ),
        (
            json!({ "type": "CustomComponent", "content": {
                "component_name": "Plot",
                "fallback_content": [{ "type": "Paragraph", "content": { "segments": text("no plot") } }]
            } }),
            vec!["data-component=\"Plot\"", "no plot"],
        ),
        (
            json!({ "type": "EmbeddedSectionRef", "content": { "section_id": "elsewhere" } }),
            vec!["unresolved-ref", "data-section-id=\"elsewhere\""],
        ),
        (
            json!({ "type": "SubSection", "content": { "id": "sub", "content": [] } }),
            vec!["id=\"sub\""],
        ),
        (
            json!({ "type": "SideBySideLayout", "content": {
                "left": { "id": "l", "content": [] },
                "right": { "id": "r", "content": [] }
            } }),
            vec!["grid-template-columns: 1fr 1fr", "id=\"panel-l\"", "id=\"panel-r\""],
        ),
        (
            json!({ "type": "PanelLayout", "content": {
                "id": "g",
                "panels": [{ "id": "p1" }, { "id": "p2" }],
                "layout_type": { "type": "Grid", "content": { "columns": 2 } }
            } }),
            vec!["data-layout-id=\"g\"", "repeat(2, 1fr)", "id=\"panel-p2\""],
        ),
        (
            json!({ "type": "AnnotationOverlay", "content": {
                "id": "ov",
                "base_content": [],
                "annotations": [
                    { "id": "a1", "annotation_type": "Note", "position": { "x": "10%", "y": "20px" } },
                    { "id": "a2", "annotation_type": "Example", "target_id": "eq-1" }
                ]
            } }),
            vec![
                "position: absolute; left: 10%; top: 20px",
                "<aside class=\"annotation annotation-example\" data-annotation-id=\"a2\" data-target-id=\"eq-1\">",
            ],
        ),
        (
            json!({ "type": "InteractiveControls", "content": {
                "id": "ctl",
                "controls": [{
                    "id": "n",
                    "label": "n",
                    "control_type": { "type": "Slider", "content": { "min": 1.0, "max": 10.0 } }
                }],
                "layout": "Vertical"
            } }),
            vec!["controls-vertical", "data-control-id=\"n\"", "step=\"1\"", "value=\"1\""],
        ),
        (
            json!({ "type": "EmbeddedDocument", "content": {
                "id": "inner", "title": "Inner", "document_type": "Article", "body": []
            } }),
            vec!["class=\"embedded-document\"", "data-document-id=\"inner\""],
        ),
    ];

    for (value, expected) in cases {
        let tag = value["type"].as_str().unwrap().to_string();
        let node = node_from(value);
        assert_eq!(node.type_name(), tag);
        assert!(!matches!(node, SectionContentNode::Unknown(_)), "{tag} fell back to Unknown");

        let html = Renderer::default().render_node(&node, &ViewState::new());
        assert!(!html.contains("unknown-content"), "{tag}: {html}");
        for fragment in expected {
            assert!(html.contains(fragment), "{tag} missing {fragment}: {html}");
        }
    }
}

#[test]
fn test_unknown_control_keeps_sibling_controls() {
    let html = render_value(json!({ "type": "InteractiveControls", "content": {
        "id": "ctl",
        "controls": [
            {
                "id": "order",
                "label": "Order",
                "control_type": { "type": "Slider", "content": { "min": 1.0, "max": 12.0 } }
            },
            { "id": "hue", "label": "Hue", "control_type": { "type": "ColorWheel" } }
        ]
    } }));

    assert!(html.contains("type=\"range\""), "{html}");
    assert!(html.contains("data-content-type=\"ColorWheel\""));
    assert!(html.contains("class=\"control control-unknown\" data-control-id=\"hue\""));
    assert!(!html.contains("data-content-type=\"InteractiveControls\""));
}

#[test]
fn test_unknown_panel_layout_stacks_panels() {
    let node = node_from(json!({ "type": "PanelLayout", "content": {
        "id": "views",
        "panels": [{ "id": "a" }, { "id": "b" }],
        "layout_type": { "type": "Carousel", "content": { "speed": 3 } }
    } }));
    assert!(matches!(node, SectionContentNode::PanelLayout(_)));

    let html = Renderer::default().render_node(&node, &ViewState::new());
    assert!(html.contains("<div class=\"panel-layout\" data-layout-id=\"views\" data-layout-type=\"Carousel\">"));
    assert!(html.contains("id=\"panel-a\""));
    assert!(html.contains("id=\"panel-b\""));
    assert!(!html.contains("hidden"));
}

#[test]
fn test_unknown_plain_values_degrade_locally() {
    let paragraph = render_value(json!({ "type": "Paragraph", "content": {
        "segments": [{ "type": "Text", "content": "tilted" }],
        "alignment": "Diagonal"
    } }));
    assert_eq!(paragraph, "<p>tilted</p>");

    let list = render_value(json!({ "type": "List", "content": {
        "items": [{ "content": [] }, { "content": [] }],
        "style": { "type": "Ordered", "content": "Hebrew" }
    } }));
    assert!(list.contains("<span class=\"list-marker\">1.</span>"));
    assert!(list.contains("<span class=\"list-marker\">2.</span>"));

    let alert = render_value(json!({ "type": "AlertBox", "content": { "alert_type": "Danger", "content": [] } }));
    assert!(alert.starts_with("<div class=\"alert\" "));

    let overlay = render_value(json!({ "type": "AnnotationOverlay", "content": {
        "id": "ov",
        "annotations": [{ "id": "a1", "annotation_type": "Aside" }]
    } }));
    assert!(overlay.contains("<aside class=\"annotation\" data-annotation-id=\"a1\">"));

    let controls = render_value(json!({ "type": "InteractiveControls", "content": {
        "id": "ctl", "controls": [], "layout": "Radial"
    } }));
    assert!(controls.starts_with("<form class=\"interactive-controls\" "));
}

#[test]
fn test_referenced_section_subsections_have_no_anchor() {
    let child = Section::new("child").with_title("Child");
    let parent = Section::new("parent")
        .with_title("Parent")
        .with_content(vec![SectionContentNode::SubSection(child)]);
    let recap = Section::new("recap").with_content(vec![SectionContentNode::EmbeddedSectionRef(
        EmbeddedSectionRef {
            section_id: "parent".to_string(),
            show_title: true,
        },
    )]);
    let html = render(&doc(DocumentType::Textbook, vec![parent, recap]));

    assert_eq!(html.matches(" id=\"child\"").count(), 1);
    assert_eq!(html.matches(" id=\"parent\"").count(), 1);
    assert_eq!(html.matches("data-section-id=\"child\"").count(), 2);
}

#[test]
fn test_footnote_ref_inside_link_is_not_an_anchor() {
    let mut document = doc(DocumentType::Article, Vec::new());
    document.footnotes.push(Footnote {
        id: "n1".to_string(),
        content: vec![RichTextSegment::text("See Artin.")],
    });
    let section = Section::new("intro").with_content(vec![SectionContentNode::paragraph(vec![
        RichTextSegment::Link {
            content: vec![
                RichTextSegment::text("cosets"),
                RichTextSegment::FootnoteReference("n1".to_string()),
            ],
            target: LinkTarget::InternalPageId("cosets".to_string()),
            tooltip: None,
        },
    ])]);

    let html = Renderer::default().render_section(&document, &section, &ViewState::new());
    assert_eq!(html.matches("<a ").count(), 1);
    assert!(html.contains("<span data-footnote-id=\"n1\">1</span>"));
}
