//! Pages API endpoint.
//!
//! Resolves a URL against the route table and returns the page's browser
//! title, head element, merged data and view as JSON.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use navidocs_routes::{DataRecord, PageView, normalize_url};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::LanguageQuery;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Browser title.
    title: Option<String>,
    /// `<head>` markup.
    head: Option<String>,
    /// Section data overlaid with the page data.
    data: DataRecord,
    /// Resolved document.
    view: PageView,
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(String::new(), query, state, headers).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(path, query, state, headers).await
}

/// Shared implementation for page resolution.
#[allow(clippy::needless_pass_by_value)]
async fn get_page_impl(
    path: String,
    query: LanguageQuery,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let url = normalize_url(&path);
    let context = state.context(query.lang);

    let resolved = state
        .site
        .resolve(&url, &context)
        .ok_or_else(|| ServerError::PageNotFound(url.clone()))?;
    let view = state
        .site
        .view(&url, &context)
        .await?
        .ok_or_else(|| ServerError::PageNotFound(url.clone()))?;

    if state.verbose && view.is_translation_missing {
        tracing::warn!(
            url = %url,
            language = context.language.as_deref().unwrap_or_default(),
            "Translation missing, served base language"
        );
    }

    let response = PageResponse {
        title: resolved.title,
        head: resolved.head.map(|tag| tag.to_html()),
        data: resolved.data,
        view,
    };
    let body = serde_json::to_string(&response)?;

    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
