use std::fs;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use theorema_core::model::{
    DocumentType, Panel, PanelLayout, PanelLayoutType, Section, SectionContentNode,
};
use theorema_core::{FlexibleDocument, MemorySource, TheoremaConfig};

use crate::conversion::{hit_to_summary, page_summary};
use crate::handlers::{self, Page};
use crate::routes::Route;
use crate::state::SiteState;

fn content_source() -> MemorySource {
    MemorySource::new()
        .with_json(
            "/manifest.json",
            json!({
                "theories": [
                    {
                        "theory_id": "group_theory",
                        "theory_name": "Group Theory",
                        "item_count": 3,
                        "files": [
                            { "file_path": "theories/group_theory/definitions.json", "content_type": "definitions" },
                            { "file_path": "theories/group_theory/theorems.json", "content_type": "theorems" }
                        ]
                    },
                    {
                        "theory_id": "ghost",
                        "theory_name": "Ghost",
                        "files": [{ "file_path": "theories/ghost/definitions.json", "content_type": "definitions" }]
                    }
                ]
            })
            .to_string(),
        )
        .with_json(
            "/theories/group_theory/definitions.json",
            json!({
                "version": "1",
                "content": [
                    { "name": "Group", "docs": "A set with an associative operation." },
                    { "name": "Subgroup", "docs": "A subset closed under the operation." }
                ]
            })
            .to_string(),
        )
        .with_json(
            "/theories/group_theory/theorems.json",
            json!({
                "version": "1",
                "content": [
                    { "name": "Lagrange", "statement": "The order of a subgroup divides the order of the group." }
                ]
            })
            .to_string(),
        )
        .with_json(
            "/documents/roadmap.json",
            json!({
                "id": "roadmap",
                "title": "Roadmap",
                "document_type": "Documentation",
                "body": [{
                    "id": "next",
                    "title": [{ "type": "Text", "content": "Next steps" }],
                    "content": []
                }]
            })
            .to_string(),
        )
}

fn setup_state() -> SiteState {
    SiteState::new(Arc::new(content_source()), TheoremaConfig::default())
}

async fn get(state: &SiteState, path: &str) -> Page {
    handlers::handle_route(state, &Route::parse(path)).await
}

#[tokio::test]
async fn test_home_page_links_sections() {
    let state = setup_state();
    let page = get(&state, "/").await;

    assert_eq!(page.status, 200);
    assert!(page.html.starts_with("<!DOCTYPE html>"));
    assert!(page.html.contains("<a href=\"/\" class=\"active\">Home</a>"));
    assert!(page.html.contains("2 theories available."));
}

#[tokio::test]
async fn test_theory_page_renders_loaded_content() {
    let state = setup_state();
    let page = get(&state, "/math/group_theory").await;

    assert_eq!(page.status, 200);
    assert_eq!(page.title, "Group Theory");
    assert!(page.html.contains("data-provenance=\"loaded\""));
    assert!(page.html.contains("id=\"theorem-lagrange\""));
    assert!(page.html.contains("id=\"definition-subgroup\""));
}

#[tokio::test]
async fn test_missing_theory_renders_placeholder() {
    let state = setup_state();
    let page = get(&state, "/math/nonexistent_theory").await;

    assert_eq!(page.status, 200);
    assert_eq!(page.title, "Nonexistent Theory (Not Found)");
    assert!(page.html.contains("data-provenance=\"not-found\""));
    assert!(page.html.contains("Paths tried"));
}

#[tokio::test]
async fn test_named_pages_load_documents() {
    let state = setup_state();

    let roadmap = get(&state, "/roadmap").await;
    assert_eq!(roadmap.title, "Roadmap");
    assert!(roadmap.html.contains("data-provenance=\"loaded\""));
    assert!(roadmap.html.contains("data-document-type=\"Documentation\""));
    assert!(roadmap.html.contains("Next steps"));
    assert_eq!(roadmap.html.matches("<main").count(), 1);
    assert!(roadmap.html.contains("<div class=\"page\">"));

    let logic = get(&state, "/logic").await;
    assert_eq!(logic.status, 200);
    assert_eq!(logic.title, "logic (Not Found)");
    assert!(logic.html.contains("data-provenance=\"not-found\""));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let state = setup_state();
    let page = get(&state, "/nowhere/<script>").await;

    assert_eq!(page.status, 404);
    assert!(page.html.contains("&lt;script&gt;"));
    assert!(!page.html.contains("<script>"));
}

#[tokio::test]
async fn test_math_page_lists_theories_and_tree() {
    let state = setup_state();
    let page = get(&state, "/math").await;

    assert!(page.html.contains("<a href=\"/math/group_theory\">Group Theory</a>"));
    assert!(page.html.contains("<li class=\"folder\"><span>Ghost</span>"));
    assert!(page.html.contains("title=\"theories/group_theory/theorems.json\""));
}

#[tokio::test]
async fn test_math_page_without_manifest_uses_discovery() {
    let source = MemorySource::new().with_json("/theories/sets/definitions.json", "[]");
    let state = SiteState::new(Arc::new(source), TheoremaConfig::default());
    let page = get(&state, "/math").await;

    assert_eq!(page.status, 200);
    assert!(page.html.contains("No theories listed."));
    assert!(page.html.contains("<span>sets</span>"));
}

#[tokio::test]
async fn test_search_degrades_failed_categories() {
    let state = setup_state();
    let hits = handlers::search_all_categories(&state, "subgroup").await;

    let names: Vec<&str> = hits.iter().map(|hit| hit.name()).collect();
    assert_eq!(names, vec!["Subgroup", "Lagrange"]);

    let summary = hit_to_summary(&hits[1]);
    assert_eq!(summary.href, "/math/group_theory#theorem-lagrange");
}

#[tokio::test]
async fn test_developer_page_marks_cached_files() {
    let state = setup_state();
    get(&state, "/math/group_theory").await;
    let page = get(&state, "/developer").await;

    assert!(page.html.contains("<li class=\"cached\"><code>/manifest.json</code></li>"));
    assert!(page.html.contains("<li><code>/documents/roadmap.json</code></li>"));
    assert!(page.html.contains("Content files (4)"));
}

#[tokio::test]
async fn test_static_dir_root() {
    let temp_dir = TempDir::new().unwrap();
    let theory_dir = temp_dir.path().join("subjects/math/theories/sets");
    fs::create_dir_all(&theory_dir).unwrap();
    fs::write(
        theory_dir.join("definitions.json"),
        json!([{ "name": "Set", "docs": "A collection." }]).to_string(),
    )
    .unwrap();

    let mut config = TheoremaConfig::default();
    config.content.root = temp_dir.path().to_path_buf();
    let state = SiteState::from_config(config);

    let route = Route::parse("/math/sets");
    let page = handlers::handle_route(&state, &route).await;
    assert_eq!(page.title, "Sets");
    assert!(page.html.contains("id=\"definition-set\""));

    let summary = page_summary(&route, &page);
    assert_eq!(summary.path, "/math/sets");
    assert_eq!(summary.bytes, page.html.len());
}

#[tokio::test]
async fn test_view_events_change_rendered_tabs() {
    let layout = PanelLayout {
        id: "views".to_string(),
        panels: ["algebraic", "geometric"]
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
    let section = Section::new("main")
        .with_content(vec![SectionContentNode::PanelLayout(layout.clone())]);
    let document = FlexibleDocument::new("views", "Views", DocumentType::InteractiveDemo)
        .with_body(vec![section]);
    let source = content_source()
        .with_json("/documents/views.json", serde_json::to_string(&document).unwrap());
    let state = SiteState::new(Arc::new(source), TheoremaConfig::default());

    let before = get(&state, "/docs/views").await;
    assert!(before.html.contains("panel-active\" id=\"panel-algebraic\""));

    assert!(state.update_view(|view| view.select_tab(&layout, "geometric")).await);
    let after = get(&state, "/docs/views").await;
    assert!(after.html.contains("panel-active\" id=\"panel-geometric\""));
    assert_eq!(after.html.matches("panel-active").count(), 1);
}
