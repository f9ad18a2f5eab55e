//! Conversion from core types to the site's output shapes.

use theorema_core::{slugify_identifier, SearchHit};

use crate::handlers::Page;
use crate::protocol::{HitKind, HitSummary, PageSummary};
use crate::routes::Route;

const EXCERPT_CHARS: usize = 120;

pub fn hit_to_summary(hit: &SearchHit) -> HitSummary {
    let (kind, theory, text) = match hit {
        SearchHit::Definition { theory, definition } => {
            (HitKind::Definition, theory, definition.docs.as_str())
        }
        SearchHit::Theorem { theory, theorem } => {
            (HitKind::Theorem, theory, theorem.statement.as_str())
        }
    };
    let anchor = match kind {
        HitKind::Definition => "definition",
        HitKind::Theorem => "theorem",
    };
    HitSummary {
        kind,
        theory: theory.clone(),
        name: hit.name().to_string(),
        href: format!(
            "/math/{}#{}-{}",
            slugify_identifier(theory),
            anchor,
            slugify_identifier(hit.name())
        ),
        excerpt: excerpt(text),
    }
}

pub fn page_summary(route: &Route, page: &Page) -> PageSummary {
    PageSummary {
        path: route.path(),
        status: page.status,
        title: page.title.clone(),
        bytes: page.html.len(),
    }
}

/// First line, cut at a char boundary.
fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= EXCERPT_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
