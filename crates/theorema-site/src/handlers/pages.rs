use std::time::Instant;

use log::{info, warn};
use theorema_core::render::escape_html;
use theorema_core::{ContentTree, FolderNode, LoadOutcome};

use crate::routes::Route;
use crate::state::SiteState;

const NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/math", "Mathematics"),
    ("/foundations", "Foundations"),
    ("/logic", "Logic"),
    ("/roadmap", "Roadmap"),
    ("/developer", "Developer"),
];

/// Pattern used by the developer page and the tree fallback.
pub const ALL_JSON: &str = "**/*.json";

/// A rendered page: status, title and the complete HTML shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub status: u16,
    pub title: String,
    pub html: String,
}

impl Page {
    fn new(status: u16, title: impl Into<String>, body: &str, current: &str) -> Self {
        let title = title.into();
        Self {
            html: shell(&title, body, current),
            status,
            title,
        }
    }
}

/// Map a route to a page. Content failures come back as placeholder pages,
/// never as errors; only a panicked blocking task yields a 500.
pub async fn handle_route(state: &SiteState, route: &Route) -> Page {
    let current = route.path();
    match route {
        Route::Home => home_page(state, &current).await,
        Route::Math => math_page(state, &current).await,
        Route::Theory(theory) => theory_page(state, theory, &current).await,
        Route::Document(id) => document_page(state, id, &current).await,
        Route::Roadmap => document_page(state, "roadmap", &current).await,
        Route::Foundations => document_page(state, "foundations", &current).await,
        Route::Logic => document_page(state, "logic", &current).await,
        Route::Developer => developer_page(state, &current).await,
        Route::NotFound(path) => not_found_page(path),
    }
}

/// Run a blocking loader call on the blocking pool.
async fn blocking<T, F>(state: &SiteState, f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(&theorema_core::ContentLoader) -> T + Send + 'static,
{
    let loader = state.loader.clone();
    match tokio::task::spawn_blocking(move || f(loader.as_ref())).await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Loader task failed: {}", e);
            None
        }
    }
}

fn log_load<T>(state: &SiteState, what: &str, outcome: &LoadOutcome<T>, started: Instant) {
    if state.config.logging.show_load_stats {
        info!(
            "Loaded {} ({}) in {:?}",
            what,
            outcome.provenance.label(),
            started.elapsed()
        );
    }
}

async fn home_page(state: &SiteState, current: &str) -> Page {
    let categories = blocking(state, |loader| loader.categories())
        .await
        .unwrap_or_default();

    let mut body = String::from("<section class=\"home\"><h1>Theorema</h1>");
    body.push_str("<p>A browsable collection of definitions, theorems and documents.</p>");
    body.push_str("<ul class=\"home-links\">");
    for (href, label) in NAV.iter().skip(1) {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            href,
            escape_html(label)
        ));
    }
    body.push_str("</ul>");
    body.push_str(&format!(
        "<p class=\"theory-count\">{} theories available.</p></section>",
        categories.len()
    ));
    Page::new(200, "Theorema", &body, current)
}

async fn math_page(state: &SiteState, current: &str) -> Page {
    let listing = blocking(state, |loader| match loader.load_manifest() {
        Ok(manifest) => {
            let tree = ContentTree::from_manifest(&manifest);
            (manifest.theories, tree)
        }
        Err(e) => {
            warn!("Manifest unavailable, building tree from discovery: {}", e);
            (Vec::new(), ContentTree::from_paths(loader.discover(ALL_JSON)))
        }
    })
    .await;
    let Some((theories, tree)) = listing else {
        return internal_error_page(current);
    };

    let mut body = String::from("<section class=\"math-index\"><h1>Mathematics</h1>");
    if theories.is_empty() {
        body.push_str("<p class=\"empty\">No theories listed.</p>");
    } else {
        body.push_str("<ul class=\"theory-list\">");
        for theory in &theories {
            body.push_str(&format!(
                "<li><a href=\"/math/{}\">{}</a> <span class=\"item-count\">{}</span></li>",
                escape_html(&theory.theory_id),
                escape_html(&theory.theory_name),
                theory.item_count
            ));
        }
        body.push_str("</ul>");
    }
    body.push_str("<nav class=\"content-tree\"><h2>Files</h2>");
    body.push_str(&render_tree(&tree));
    body.push_str("</nav></section>");
    Page::new(200, "Mathematics", &body, current)
}

async fn theory_page(state: &SiteState, theory: &str, current: &str) -> Page {
    let started = Instant::now();
    let path = theory.to_string();
    let Some(outcome) = blocking(state, move |loader| loader.load_theory(&path)).await else {
        return internal_error_page(current);
    };
    log_load(state, theory, &outcome, started);

    let html = state.renderer.render_math_content(&outcome);
    Page::new(200, outcome.value.theory.clone(), &html, current)
}

async fn document_page(state: &SiteState, id: &str, current: &str) -> Page {
    let started = Instant::now();
    let document_id = id.to_string();
    let Some(outcome) = blocking(state, move |loader| loader.load_document(&document_id)).await
    else {
        return internal_error_page(current);
    };
    log_load(state, id, &outcome, started);

    let view = state.view.read().await;
    let html = state.renderer.render_document(&outcome.value, &view);
    let body = format!(
        "<div class=\"document-page\" data-provenance=\"{}\">{}</div>",
        outcome.provenance.label(),
        html
    );
    Page::new(200, outcome.value.title.clone(), &body, current)
}

async fn developer_page(state: &SiteState, current: &str) -> Page {
    let Some(files) = blocking(state, |loader| loader.discover(ALL_JSON)).await else {
        return internal_error_page(current);
    };
    let cached = state.loader.cache().keys();

    let mut body = String::from("<section class=\"developer\"><h1>Developer</h1>");
    body.push_str(&format!(
        "<dl class=\"cache-stats\"><dt>Cache</dt><dd>{}</dd><dt>Entries</dt><dd>{}</dd></dl>",
        if state.config.cache.enabled { "enabled" } else { "disabled" },
        cached.len()
    ));
    body.push_str(&format!("<h2>Content files ({})</h2>", files.len()));
    body.push_str("<ul class=\"content-files\">");
    for file in &files {
        let class = if cached.contains(file) { " class=\"cached\"" } else { "" };
        body.push_str(&format!(
            "<li{}><code>{}</code></li>",
            class,
            escape_html(file)
        ));
    }
    body.push_str("</ul>");
    body.push_str("<h2>Folder tree</h2>");
    body.push_str(&render_tree(&ContentTree::from_paths(&files)));
    body.push_str("</section>");
    Page::new(200, "Developer", &body, current)
}

fn not_found_page(path: &str) -> Page {
    let body = format!(
        "<section class=\"not-found\"><h1>Page not found</h1><p>No page at <code>{}</code>.</p>\
         <p><a href=\"/\">Back to the home page</a></p></section>",
        escape_html(path)
    );
    Page::new(404, "Page not found", &body, path)
}

fn internal_error_page(current: &str) -> Page {
    let body = "<section class=\"error\"><h1>Something went wrong</h1></section>";
    Page::new(500, "Error", body, current)
}

/// Nested lists; virtual folders have no path.
pub fn render_tree(tree: &ContentTree) -> String {
    fn walk(nodes: &[FolderNode], out: &mut String) {
        out.push_str("<ul class=\"tree\">");
        for node in nodes {
            if node.is_virtual() {
                out.push_str("<li class=\"folder\"><span>");
                out.push_str(&escape_html(&node.name));
                out.push_str("</span>");
            } else {
                out.push_str("<li class=\"file\"><span title=\"");
                out.push_str(&escape_html(node.path.as_deref().unwrap_or_default()));
                out.push_str("\">");
                out.push_str(&escape_html(&node.name));
                out.push_str("</span>");
            }
            if !node.children.is_empty() {
                walk(&node.children, out);
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
    let mut out = String::new();
    walk(&tree.roots, &mut out);
    out
}

fn shell(title: &str, body: &str, current: &str) -> String {
    let mut nav = String::from("<nav class=\"site-nav\"><ul>");
    for (href, label) in NAV {
        let active = if *href == current { " class=\"active\"" } else { "" };
        nav.push_str(&format!(
            "<li><a href=\"{}\"{}>{}</a></li>",
            href, active, label
        ));
    }
    nav.push_str("</ul></nav>");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | Theorema</title>\n</head>\n<body>\n{}\n<div class=\"page\">{}</div>\n</body>\n</html>\n",
        escape_html(title),
        nav,
        body
    )
}
