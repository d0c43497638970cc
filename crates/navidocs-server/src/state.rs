//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use navidocs_routes::{DocumentComponents, RouteContext, Site, StaticComponents};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Route table and page resolution.
    pub(crate) site: Arc<Site>,
    /// Components handed to every document.
    pub(crate) components: Arc<StaticComponents>,
    /// Enable verbose output (log missing translations).
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Build the route context for a request language.
    ///
    /// An empty language is treated as absent.
    pub(crate) fn context(&self, language: Option<String>) -> RouteContext {
        let components: Arc<StaticComponents> = Arc::clone(&self.components);
        let provider: Arc<dyn DocumentComponents> = components;
        RouteContext {
            language: language.filter(|l| !l.is_empty()),
            document_components: Some(provider),
        }
    }
}
