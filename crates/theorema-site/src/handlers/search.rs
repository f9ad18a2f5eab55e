use log::{debug, warn};
use theorema_core::loader::search_content;
use theorema_core::SearchHit;
use tokio::task::JoinSet;

use crate::state::SiteState;

/// Search every manifest category concurrently, one blocking task each.
///
/// Hits are returned in category order. A category whose task fails
/// contributes nothing.
pub async fn search_all_categories(state: &SiteState, query: &str) -> Vec<SearchHit> {
    let loader = state.loader.clone();
    let categories = match tokio::task::spawn_blocking(move || loader.categories()).await {
        Ok(categories) => categories,
        Err(e) => {
            warn!("Category listing failed: {}", e);
            return Vec::new();
        }
    };

    let mut tasks = JoinSet::new();
    for (index, category) in categories.into_iter().enumerate() {
        let loader = state.loader.clone();
        let query = query.to_string();
        tasks.spawn_blocking(move || {
            let outcome = loader.load_theory(&category);
            (index, search_content(&outcome, &query))
        });
    }

    let mut results: Vec<(usize, Vec<SearchHit>)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => warn!("Search task failed: {}", e),
        }
    }
    results.sort_by_key(|(index, _)| *index);

    let hits: Vec<SearchHit> = results.into_iter().flat_map(|(_, hits)| hits).collect();
    debug!("Search '{}' matched {} entries", query, hits.len());
    hits
}
