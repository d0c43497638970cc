//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::source::{BoxFuture, ContentError, ContentErrorKind, ContentModule, ContentSource};

/// Mock content source for testing.
///
/// Stores modules in memory keyed by `(document, language)` and records every
/// resolution request. Use the builder methods to configure test data.
///
/// # Example
///
/// ```ignore
/// use navidocs_content::{ContentModule, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_module("motivation", "en", ContentModule::new("# Motivation"));
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    modules: RwLock<HashMap<(String, String), ContentModule>>,
    failures: RwLock<HashMap<(String, String), ContentErrorKind>>,
    requests: RwLock<Vec<(String, String)>>,
}

impl MockContentSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module for a document and language.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_module(
        self,
        document: impl Into<String>,
        language: impl Into<String>,
        module: ContentModule,
    ) -> Self {
        self.modules
            .write()
            .unwrap()
            .insert((document.into(), language.into()), module);
        self
    }

    /// Add a module with a body and a conventional filename.
    #[must_use]
    pub fn with_document(
        self,
        document: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let document = document.into();
        let language = language.into();
        let module =
            ContentModule::new(content).with_filename(format!("{document}/document.{language}.md"));
        self.with_module(document, language, module)
    }

    /// Make resolution of a document and language fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(
        self,
        document: impl Into<String>,
        language: impl Into<String>,
        kind: ContentErrorKind,
    ) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert((document.into(), language.into()), kind);
        self
    }

    /// All `(document, language)` pairs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.read().unwrap().clone()
    }

    fn lookup(&self, document: &str, language: &str) -> Result<ContentModule, ContentError> {
        let key = (document.to_owned(), language.to_owned());
        self.requests.write().unwrap().push(key.clone());

        if let Some(&kind) = self.failures.read().unwrap().get(&key) {
            return Err(ContentError::new(kind)
                .with_backend("Mock")
                .with_path(format!("{document}/{language}")));
        }

        self.modules
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                ContentError::not_found(format!("{document}/{language}")).with_backend("Mock")
            })
    }
}

impl ContentSource for MockContentSource {
    fn resolve<'a>(
        &'a self,
        document: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<ContentModule, ContentError>> {
        let result = self.lookup(document, language);
        Box::pin(async move { result })
    }
}
