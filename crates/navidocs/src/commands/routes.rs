//! `navidocs routes` command implementation.

use clap::Args;
use navidocs_routes::{PageEntry, RouteContext, RouteRequest, Site};

use crate::commands::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Language to resolve titles in (default: base language).
    #[arg(long)]
    lang: Option<String>,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the route table can't be loaded.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let (site, _) = self.site.load_site(version, false)?;

        for line in route_lines(&site, self.lang) {
            match line {
                RouteLine::Section(title) => output.heading(&title),
                RouteLine::Page(text) => output.line(&text),
            }
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum RouteLine {
    Section(String),
    Page(String),
}

/// Render the route table, one line per page, grouped under section titles.
fn route_lines(site: &Site, language: Option<String>) -> Vec<RouteLine> {
    let context = RouteContext {
        language,
        document_components: None,
    };
    let mut lines = Vec::new();
    let mut current_section = None;

    for entry in site.pages() {
        if entry.section != current_section {
            if let Some(title) = &entry.section {
                lines.push(RouteLine::Section(title.clone()));
            }
            current_section.clone_from(&entry.section);
        }
        lines.push(RouteLine::Page(page_line(&entry, &context)));
    }

    lines
}

fn page_line(entry: &PageEntry<'_>, context: &RouteContext) -> String {
    let data = entry
        .page
        .data(&RouteRequest::new(entry.url.clone()), context);
    let title = data.html_title.unwrap_or_default();
    let languages = data.translations.join(",");
    format!(
        "{:<40} {:<40} [{languages}] {title}",
        entry.url,
        entry.page.document()
    )
}

#[cfg(test)]
mod tests {
    use navidocs_server::{ServerConfig, build_site};
    use pretty_assertions::assert_eq;

    use super::*;

    fn navi_site() -> Site {
        build_site(&ServerConfig::default()).unwrap()
    }

    #[test]
    fn test_route_lines_grouped_by_section() {
        let lines = route_lines(&navi_site(), None);

        let sections: Vec<_> = lines
            .iter()
            .filter_map(|line| match line {
                RouteLine::Section(title) => Some(title.as_str()),
                RouteLine::Page(_) => None,
            })
            .collect();
        assert_eq!(
            sections,
            vec!["Guides", "API Reference", "Usage with...", "Deploy with..."]
        );
        assert_eq!(lines.len(), 23 + 4);
    }

    #[test]
    fn test_route_line_content() {
        let lines = route_lines(&navi_site(), None);

        let RouteLine::Page(root) = &lines[0] else {
            panic!("expected page line");
        };
        assert!(root.starts_with("/ "));
        assert!(root.contains("start-here"));
        assert!(root.contains("[en,ja]"));
        assert!(root.ends_with("Navi – A library for mapping URLs to content"));
    }

    #[test]
    fn test_route_lines_localized() {
        let lines = route_lines(&navi_site(), Some("ja".to_owned()));

        let RouteLine::Page(comparisons) = &lines[2] else {
            panic!("expected page line");
        };
        assert!(comparisons.contains("comparison"));
        assert!(comparisons.ends_with("Is Navi For Me?"));
    }
}
