//! `navidocs check` command implementation.
//!
//! Resolves every page in every language it declares and reports what the
//! server would have to paper over: translations served in the base
//! language, and documents that don't export a filename.

use clap::Args;
use navidocs_routes::{RouteContext, RouteRequest, Site};

use crate::commands::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Problem found while checking a page.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Finding {
    /// The base language document can't be resolved.
    Unresolved {
        url: String,
        language: String,
        error: String,
    },
    /// A declared translation falls back to the base language.
    MissingTranslation { url: String, language: String },
    /// The resolved document has no filename.
    MissingFilename { url: String, language: String },
}

impl Finding {
    fn is_error(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }

    fn message(&self) -> String {
        match self {
            Self::Unresolved {
                url,
                language,
                error,
            } => format!("{url} [{language}]: {error}"),
            Self::MissingTranslation { url, language } => {
                format!("{url} [{language}]: translation missing, base language served")
            }
            Self::MissingFilename { url, language } => {
                format!("{url} [{language}]: content does not export a filename")
            }
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site can't be loaded or any page fails to
    /// resolve in its base language.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let (site, _) = self.site.load_site(version, self.verbose)?;

        let findings = check_site(&site).await;
        for finding in &findings {
            if finding.is_error() {
                output.error(&finding.message());
            } else {
                output.warning(&finding.message());
            }
        }

        let errors = findings.iter().filter(|f| f.is_error()).count();
        let warnings = findings.len() - errors;
        let pages = site.pages().len();

        if errors > 0 {
            return Err(CliError::Validation(format!(
                "{errors} page(s) could not be resolved ({warnings} warning(s))"
            )));
        }

        output.success(&format!(
            "Checked {pages} page(s): {warnings} warning(s)"
        ));
        Ok(())
    }
}

/// Resolve every page in every declared language.
pub(crate) async fn check_site(site: &Site) -> Vec<Finding> {
    let mut findings = Vec::new();

    for entry in site.pages() {
        for language in entry.page.translations() {
            let context = RouteContext::for_language(language.clone());
            let request = RouteRequest::new(entry.url.clone());
            tracing::debug!(url = %entry.url, language = %language, "Checking page");

            match entry.page.view(&request, &context).await {
                Err(err) => findings.push(Finding::Unresolved {
                    url: entry.url.clone(),
                    language,
                    error: err.to_string(),
                }),
                Ok(view) => {
                    if view.module.filename.is_none() {
                        findings.push(Finding::MissingFilename {
                            url: entry.url.clone(),
                            language: language.clone(),
                        });
                    }
                    if view.is_translation_missing {
                        findings.push(Finding::MissingTranslation {
                            url: entry.url.clone(),
                            language,
                        });
                    }
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use navidocs_server::{ServerConfig, build_site};
    use pretty_assertions::assert_eq;

    use super::*;

    const ROUTES: &str = r"
- path: /
  document: start-here
  meta:
    title: Navi
  translations:
    ja:
      navTitle: ここで始める
- path: /guides
  section: Guides
  routes:
    - path: /getting-started
      document: guides/getting-started
      meta:
        title: Getting Started
";

    fn write_document(root: &Path, document: &str, language: &str, body: &str) {
        let dir = root.join(document);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("document.{language}.md")), body).unwrap();
    }

    fn site(root: &Path) -> Site {
        let routes_file = root.join("routes.yaml");
        std::fs::write(&routes_file, ROUTES).unwrap();
        build_site(&ServerConfig {
            source_dir: root.join("content"),
            routes_file: Some(routes_file),
            ..ServerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_check_complete_site() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        write_document(&content, "start-here", "en", "# Navi");
        write_document(&content, "start-here", "ja", "# ナビ");
        write_document(&content, "guides/getting-started", "en", "# Getting Started");

        let findings = tokio_test::block_on(check_site(&site(dir.path())));

        assert_eq!(findings, vec![]);
    }

    #[test]
    fn test_check_reports_missing_translation() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        write_document(&content, "start-here", "en", "# Navi");
        write_document(&content, "guides/getting-started", "en", "# Getting Started");

        let findings = tokio_test::block_on(check_site(&site(dir.path())));

        assert_eq!(
            findings,
            vec![Finding::MissingTranslation {
                url: "/".to_owned(),
                language: "ja".to_owned(),
            }]
        );
        assert!(!findings[0].is_error());
    }

    #[test]
    fn test_check_reports_unresolved_base_document() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        write_document(&content, "start-here", "en", "# Navi");
        write_document(&content, "start-here", "ja", "# ナビ");

        let findings = tokio_test::block_on(check_site(&site(dir.path())));

        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(findings[0].message().starts_with("/guides/getting-started [en]"));
    }
}
