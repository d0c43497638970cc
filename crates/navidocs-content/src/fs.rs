//! Filesystem content source.
//!
//! Documents live in one directory per document key, with one markdown file
//! per language:
//!
//! ```text
//! content/
//! ├── start-here/
//! │   ├── document.en.md
//! │   └── document.ja.md
//! └── guides/
//!     └── getting-started/
//!         └── document.en.md
//! ```

use std::path::{Path, PathBuf};

use crate::front_matter::split_front_matter;
use crate::source::{BoxFuture, ContentError, ContentErrorKind, ContentModule, ContentSource};
use crate::toc::extract_toc;

const BACKEND: &str = "Fs";

/// File stem shared by every document file.
const DOCUMENT_STEM: &str = "document";

/// Extension of document files.
const DOCUMENT_EXTENSION: &str = "md";

/// Content source backed by a directory tree.
///
/// Files are read on every resolution, so edits show up without a restart.
#[derive(Clone, Debug)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative filename for a document and language.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::InvalidPath`] if the document key or language
    /// could escape the root directory.
    pub fn document_filename(document: &str, language: &str) -> Result<String, ContentError> {
        validate_document_key(document)?;
        validate_language(language)?;
        Ok(format!(
            "{document}/{DOCUMENT_STEM}.{language}.{DOCUMENT_EXTENSION}"
        ))
    }

    async fn load(&self, document: &str, language: &str) -> Result<ContentModule, ContentError> {
        let filename = Self::document_filename(document, language)?;
        let full_path = self.root.join(&filename);

        let text = tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| ContentError::io(e, Some(PathBuf::from(&filename))).with_backend(BACKEND))?;

        let (front_matter, body) = split_front_matter(&text).map_err(|e| {
            ContentError::new(ContentErrorKind::InvalidContent)
                .with_backend(BACKEND)
                .with_path(&filename)
                .with_source(e)
        })?;

        let table_of_contents = front_matter
            .table_of_contents
            .unwrap_or_else(|| extract_toc(body));

        tracing::debug!(document, language, file = %filename, "Resolved document");

        Ok(ContentModule {
            content: body.to_owned(),
            demoboard_helpers: front_matter.demoboard_helpers,
            table_of_contents: Some(table_of_contents),
            filename: Some(front_matter.filename.unwrap_or(filename)),
            exports: front_matter.exports,
        })
    }
}

impl ContentSource for FsContentSource {
    fn resolve<'a>(
        &'a self,
        document: &'a str,
        language: &'a str,
    ) -> BoxFuture<'a, Result<ContentModule, ContentError>> {
        Box::pin(self.load(document, language))
    }
}

fn invalid_path(path: &str) -> ContentError {
    ContentError::new(ContentErrorKind::InvalidPath)
        .with_backend(BACKEND)
        .with_path(path)
}

fn validate_document_key(document: &str) -> Result<(), ContentError> {
    let valid = !document.is_empty()
        && !document.contains('\\')
        && document
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if valid {
        Ok(())
    } else {
        Err(invalid_path(document))
    }
}

fn validate_language(language: &str) -> Result<(), ContentError> {
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(invalid_path(language))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_document(root: &Path, document: &str, language: &str, text: &str) {
        let dir = root.join(document);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("document.{language}.md")), text).unwrap();
    }

    #[test]
    fn test_document_filename() {
        assert_eq!(
            FsContentSource::document_filename("guides/nested-views", "ja").unwrap(),
            "guides/nested-views/document.ja.md"
        );
    }

    #[test]
    fn test_document_filename_rejects_traversal() {
        for key in ["", "../secrets", "guides/../../etc", "a//b", "a\\b"] {
            let err = FsContentSource::document_filename(key, "en").unwrap_err();
            assert_eq!(err.kind, ContentErrorKind::InvalidPath, "key: {key:?}");
        }
    }

    #[test]
    fn test_document_filename_rejects_bad_language() {
        for language in ["", "../en", "en/..", "e n"] {
            let err = FsContentSource::document_filename("motivation", language).unwrap_err();
            assert_eq!(err.kind, ContentErrorKind::InvalidPath, "language: {language:?}");
        }
    }

    #[test]
    fn test_resolve_reads_document() {
        let temp = tempfile::tempdir().unwrap();
        write_document(
            temp.path(),
            "motivation",
            "en",
            "# Motivation\n\n## Why\n\nBecause.\n",
        );
        let source = FsContentSource::new(temp.path());

        let module = tokio_test::block_on(source.resolve("motivation", "en")).unwrap();

        assert!(module.content.contains("Because."));
        assert_eq!(module.filename.as_deref(), Some("motivation/document.en.md"));
        let toc = module.table_of_contents.unwrap();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "why");
    }

    #[test]
    fn test_resolve_front_matter_exports() {
        let temp = tempfile::tempdir().unwrap();
        write_document(
            temp.path(),
            "guides/getting-started",
            "ja",
            "---\ndemoboardHelpers:\n  App.js: code\nauthor: james\n---\nはじめに\n",
        );
        let source = FsContentSource::new(temp.path());

        let module =
            tokio_test::block_on(source.resolve("guides/getting-started", "ja")).unwrap();

        assert_eq!(module.content, "はじめに\n");
        assert!(module.demoboard_helpers.is_some());
        assert_eq!(module.exports.get("author"), Some(&serde_json::json!("james")));
    }

    #[test]
    fn test_resolve_front_matter_filename_wins() {
        let temp = tempfile::tempdir().unwrap();
        write_document(
            temp.path(),
            "deploy/now",
            "en",
            "---\nfilename: src/content/deploy/now/document.en.mdx\n---\nBody",
        );
        let source = FsContentSource::new(temp.path());

        let module = tokio_test::block_on(source.resolve("deploy/now", "en")).unwrap();

        assert_eq!(
            module.filename.as_deref(),
            Some("src/content/deploy/now/document.en.mdx")
        );
    }

    #[test]
    fn test_resolve_missing_translation() {
        let temp = tempfile::tempdir().unwrap();
        write_document(temp.path(), "motivation", "en", "Body");
        let source = FsContentSource::new(temp.path());

        let err = tokio_test::block_on(source.resolve("motivation", "ja")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path.as_deref(),
            Some(Path::new("motivation/document.ja.md"))
        );
    }

    #[test]
    fn test_resolve_invalid_front_matter() {
        let temp = tempfile::tempdir().unwrap();
        write_document(temp.path(), "router", "en", "---\nbroken: [\n---\nBody");
        let source = FsContentSource::new(temp.path());

        let err = tokio_test::block_on(source.resolve("router", "en")).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidContent);
    }
}
