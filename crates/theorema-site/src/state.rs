use std::sync::Arc;

use theorema_core::{
    ContentLoader, ContentSource, Renderer, StaticDirSource, TheoremaConfig, ViewState,
};
use tokio::sync::RwLock;

/// Shared state for the site shell.
/// Clones share the loader, its cache and the view state.
#[derive(Clone)]
pub struct SiteState {
    pub loader: Arc<ContentLoader>,
    pub renderer: Arc<Renderer>,
    pub config: Arc<TheoremaConfig>,
    /// Read for rendering, written by UI events (tab select, toggles)
    pub view: Arc<RwLock<ViewState>>,
}

impl SiteState {
    pub fn new(source: Arc<dyn ContentSource>, config: TheoremaConfig) -> Self {
        let renderer = Renderer::new(config.render.clone());
        Self {
            loader: Arc::new(ContentLoader::new(source, config.clone())),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
            view: Arc::new(RwLock::new(ViewState::new())),
        }
    }

    /// Serve static files from `content.root`.
    pub fn from_config(config: TheoremaConfig) -> Self {
        let source = StaticDirSource::new(config.content.root.clone());
        Self::new(Arc::new(source), config)
    }

    /// Apply a UI event (tab select, toggle, control change) to the shared view.
    pub async fn update_view<R>(&self, event: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self.view.write().await;
        event(&mut view)
    }
}
