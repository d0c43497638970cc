//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No route matches the URL.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The matched page's document could not be resolved.
    #[error("Content error: {0}")]
    Content(#[from] navidocs_content::ContentError),

    /// The route table could not be built.
    #[error("Route table error: {0}")]
    Routes(#[from] navidocs_routes::RouteError),

    /// Response serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::Content(_) | Self::Routes(_) | Self::Json(_) | Self::Io(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": self.to_string()}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use navidocs_content::{ContentError, ContentErrorKind};

    use super::*;

    #[test]
    fn test_page_not_found_status() {
        let response = ServerError::PageNotFound("/nope".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_content_error_status() {
        let err = ContentError::new(ContentErrorKind::Unavailable).with_backend("Mock");

        let response = ServerError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
