//! Navigation API endpoint.
//!
//! Returns the sidebar model for the documentation site.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use navidocs_routes::Navigation;

use crate::handlers::LanguageQuery;
use crate::state::AppState;

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
) -> Json<Navigation> {
    let language = query.lang.filter(|l| !l.is_empty());
    Json(state.site.navigation(language.as_deref()))
}
