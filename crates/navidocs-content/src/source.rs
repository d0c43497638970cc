//! Content source trait and error types.
//!
//! Provides the core [`ContentSource`] trait for resolving localized documents,
//! the [`ContentModule`] a resolution produces, and [`ContentError`] for
//! unified error handling across backends.
//!
//! # Document Keys
//!
//! Documents are addressed by a slash-separated key plus a language code:
//! - `("start-here", "en")` - the English home page document
//! - `("guides/getting-started", "ja")` - a Japanese guide
//!
//! Sources decide how a key maps to their internal storage format.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::toc::TocEntry;

/// Boxed future returned by [`ContentSource`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Exports of one resolved, language-specific document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModule {
    /// Renderable document body.
    pub content: String,
    /// Helpers for interactive demos embedded in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demoboard_helpers: Option<serde_json::Value>,
    /// Headings of the document, if the module provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<Vec<TocEntry>>,
    /// Source filename, used by "edit this page" links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Any other named exports, passed through to the view untouched.
    #[serde(flatten)]
    pub exports: BTreeMap<String, serde_json::Value>,
}

impl ContentModule {
    /// Create a module with the given body and no other exports.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the source filename.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the table of contents.
    #[must_use]
    pub fn with_table_of_contents(mut self, toc: Vec<TocEntry>) -> Self {
        self.table_of_contents = Some(toc);
        self
    }

    /// Add a pass-through export.
    #[must_use]
    pub fn with_export(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.exports.insert(name.into(), value);
        self
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// No module exists for this document and language.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Document key or language code is not acceptable.
    InvalidPath,
    /// Module exists but could not be parsed.
    InvalidContent,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(ContentErrorKind::NotFound).with_path(path)
    }

    /// Check whether the module simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ContentErrorKind::NotFound
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ContentErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => ContentErrorKind::Unavailable,
            _ => ContentErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::PermissionDenied => "Permission denied",
            ContentErrorKind::InvalidPath => "Invalid path",
            ContentErrorKind::InvalidContent => "Invalid content",
            ContentErrorKind::Unavailable => "Unavailable",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Capability for resolving localized document modules.
///
/// Implementations are shared across concurrent requests and must not hold
/// per-request state. A failed resolution is reported as an error; the
/// caller decides whether to retry with another language.
pub trait ContentSource: Send + Sync {
    /// Resolve the module for `document` in `language`.
    ///
    /// # Arguments
    ///
    /// * `document` - Document key (e.g., "start-here", "guides/nested-views")
    /// * `language` - Language code (e.g., "en", "ja")
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] with [`ContentErrorKind::NotFound`] if no
    /// module exists for the pair, or another kind if it can't be loaded.
    fn resolve<'a>(
        &'a self,
        document: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<ContentModule, ContentError>>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_content_module_serialization_flattens_exports() {
        let module = ContentModule::new("# Hello")
            .with_filename("start-here/document.en.md")
            .with_export("readingTime", serde_json::json!(3));

        let json = serde_json::to_value(&module).unwrap();

        assert_eq!(json["content"], "# Hello");
        assert_eq!(json["filename"], "start-here/document.en.md");
        assert_eq!(json["readingTime"], 3);
        assert!(json.get("demoboardHelpers").is_none());
        assert!(json.get("tableOfContents").is_none());
    }

    #[test]
    fn test_content_module_deserialization_collects_unknown_exports() {
        let json = serde_json::json!({
            "content": "body",
            "demoboardHelpers": {"App.js": "export default 1"},
            "author": "james",
        });

        let module: ContentModule = serde_json::from_value(json).unwrap();

        assert_eq!(module.content, "body");
        assert!(module.demoboard_helpers.is_some());
        assert_eq!(module.exports.get("author"), Some(&serde_json::json!("james")));
        assert!(module.filename.is_none());
    }

    #[test]
    fn test_content_error_new() {
        let err = ContentError::new(ContentErrorKind::NotFound);

        assert_eq!(err.kind, ContentErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_content_error_not_found() {
        let err = ContentError::not_found("guides/document.ja.md");

        assert!(err.is_not_found());
        assert_eq!(err.path.as_deref(), Some(Path::new("guides/document.ja.md")));
    }

    #[test]
    fn test_content_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ContentError::new(ContentErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_content_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ContentError::io(io_err, None);

        assert_eq!(err.kind, ContentErrorKind::PermissionDenied);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_content_error_display_simple() {
        let err = ContentError::new(ContentErrorKind::InvalidPath);

        assert_eq!(err.to_string(), "Invalid path");
    }

    #[test]
    fn test_content_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ContentError::new(ContentErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("motivation/document.ja.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: motivation/document.ja.md)"
        );
    }

    #[test]
    fn test_content_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentError>();
    }
}
