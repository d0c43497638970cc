//! Site-wide view of a route table.
//!
//! [`Site`] owns the root [`RouteMap`] and answers URL-level questions: which
//! page a URL maps to, what data it resolves to for a request, and what the
//! navigation sidebar looks like. A `Site` is immutable and meant to be
//! shared across request handlers through an `Arc`.

use navidocs_content::ContentError;
use serde::Serialize;

use crate::fragment::Fragment;
use crate::metadata::PageData;
use crate::page::{HeadTag, Page, PageView, RouteContext, RouteRequest};
use crate::route_map::{DataRecord, Matcher, RouteMap, SECTION_TITLE_KEY};

/// A page matched for a URL.
#[derive(Clone, Debug)]
pub struct RouteMatch<'a> {
    /// Normalized URL.
    pub url: String,
    /// Matched page.
    pub page: &'a Page,
    /// Data accumulated from enclosing sections.
    pub data: DataRecord,
}

impl RouteMatch<'_> {
    /// Title of the enclosing section, if any.
    #[must_use]
    pub fn section_title(&self) -> Option<&str> {
        self.data.get(SECTION_TITLE_KEY).and_then(|v| v.as_str())
    }

    /// Request for this match.
    #[must_use]
    pub fn request(&self) -> RouteRequest {
        RouteRequest::new(self.url.clone())
    }
}

/// Everything known about a URL for one request, short of its content.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// Normalized URL.
    pub url: String,
    /// Browser title.
    pub title: Option<String>,
    /// `<head>` element.
    pub head: Option<HeadTag>,
    /// Section data overlaid with the page data.
    pub data: DataRecord,
}

/// A page listed by [`Site::pages`].
#[derive(Clone, Debug)]
pub struct PageEntry<'a> {
    /// Full URL of the page.
    pub url: String,
    /// Title of the enclosing section.
    pub section: Option<String>,
    /// The page.
    pub page: &'a Page,
}

/// A navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Target URL.
    pub url: String,
    /// Link label: `navTitle`, falling back to `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Fragment>,
    /// Whether the page's table of contents is listed under the link.
    pub table_of_contents: bool,
}

/// A titled group of navigation links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Section title.
    pub title: String,
    /// Links in declaration order.
    pub items: Vec<NavItem>,
}

/// Navigation sidebar model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Pages outside any section.
    pub items: Vec<NavItem>,
    /// Sections in declaration order.
    pub sections: Vec<NavSection>,
}

/// Route table plus URL-level queries.
#[derive(Clone, Debug)]
pub struct Site {
    routes: RouteMap,
}

impl Site {
    /// Create a site from its root table.
    #[must_use]
    pub fn new(routes: RouteMap) -> Self {
        Self { routes }
    }

    /// Root table.
    #[must_use]
    pub fn routes(&self) -> &RouteMap {
        &self.routes
    }

    /// Find the page for a URL.
    ///
    /// Longer keys are tried before shorter ones within each table, so
    /// `/guides/nested-views` is never shadowed by a shorter prefix.
    #[must_use]
    pub fn match_route(&self, url: &str) -> Option<RouteMatch<'_>> {
        let url = normalize_url(url);
        let (page, data) = match_map(&self.routes, &url, DataRecord::new())?;
        Some(RouteMatch { url, page, data })
    }

    /// Resolve title, head and merged data for a URL.
    #[must_use]
    pub fn resolve(&self, url: &str, context: &RouteContext) -> Option<ResolvedRoute> {
        let matched = self.match_route(url)?;
        let request = matched.request();
        let page_data = matched.page.data(&request, context);
        let head = matched.page.head(&request, context);

        Some(ResolvedRoute {
            title: page_data.html_title.clone(),
            head,
            data: overlay_page_data(matched.data, &page_data),
            url: matched.url,
        })
    }

    /// Resolve the view for a URL.
    ///
    /// Returns `Ok(None)` when no route matches.
    ///
    /// # Errors
    ///
    /// Returns the [`ContentError`] of a page whose content can't be resolved.
    pub async fn view(
        &self,
        url: &str,
        context: &RouteContext,
    ) -> Result<Option<PageView>, ContentError> {
        let Some(matched) = self.match_route(url) else {
            return Ok(None);
        };
        matched
            .page
            .view(&matched.request(), context)
            .await
            .map(Some)
    }

    /// Every page with its full URL, in declaration order.
    #[must_use]
    pub fn pages(&self) -> Vec<PageEntry<'_>> {
        let mut pages = Vec::new();
        collect_pages(&self.routes, "", None, &mut pages);
        pages
    }

    /// Navigation model for a language.
    #[must_use]
    pub fn navigation(&self, language: Option<&str>) -> Navigation {
        let context = RouteContext {
            language: language.map(str::to_owned),
            document_components: None,
        };
        let mut navigation = Navigation::default();

        for entry in self.pages() {
            let data = entry.page.data(&RouteRequest::new(entry.url.clone()), &context);
            let item = nav_item(entry.url, &data);
            match entry.section {
                None => navigation.items.push(item),
                Some(title) => match navigation.sections.iter_mut().find(|s| s.title == title) {
                    Some(section) => section.items.push(item),
                    None => navigation.sections.push(NavSection {
                        title,
                        items: vec![item],
                    }),
                },
            }
        }

        navigation
    }
}

fn nav_item(url: String, data: &PageData) -> NavItem {
    NavItem {
        url,
        title: data.nav_label().cloned(),
        table_of_contents: data.nav_table_of_contents.unwrap_or(true),
    }
}

/// Section data first, then page data fields on top.
fn overlay_page_data(mut data: DataRecord, page: &PageData) -> DataRecord {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(page) {
        data.extend(fields);
    }
    data
}

/// Normalize a URL path: leading `/`, no trailing `/`, no empty segments.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Join a mount prefix and a key.
fn join_url(prefix: &str, key: &str) -> String {
    match (prefix, key) {
        ("", key) => key.to_owned(),
        (prefix, "/") => prefix.to_owned(),
        (prefix, key) => format!("{prefix}{key}"),
    }
}

/// Path remaining after `key`, if `key` matches `path`.
fn strip_key<'p>(path: &'p str, key: &str) -> Option<&'p str> {
    if key == "/" {
        return (path == "/").then_some("/");
    }
    if path == key {
        return Some("/");
    }
    path.strip_prefix(key).filter(|rest| rest.starts_with('/'))
}

fn match_map<'a>(
    map: &'a RouteMap,
    path: &str,
    data: DataRecord,
) -> Option<(&'a Page, DataRecord)> {
    let mut entries: Vec<_> = map.entries().collect();
    entries.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));

    entries.into_iter().find_map(|(key, matcher)| {
        let rest = strip_key(path, key)?;
        match_matcher(matcher, rest, data.clone())
    })
}

fn match_matcher<'a>(
    matcher: &'a Matcher,
    path: &str,
    mut data: DataRecord,
) -> Option<(&'a Page, DataRecord)> {
    match matcher {
        Matcher::Page(page) => (path == "/").then_some((page, data)),
        Matcher::Map(map) => match_map(map, path, data),
        Matcher::WithData { data: own, inner } => {
            data.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
            match_matcher(inner, path, data)
        }
    }
}

fn collect_pages<'a>(
    map: &'a RouteMap,
    prefix: &str,
    section: Option<&str>,
    pages: &mut Vec<PageEntry<'a>>,
) {
    for (key, matcher) in map.entries() {
        collect_matcher(matcher, &join_url(prefix, key), section, pages);
    }
}

fn collect_matcher<'a>(
    matcher: &'a Matcher,
    url: &str,
    section: Option<&str>,
    pages: &mut Vec<PageEntry<'a>>,
) {
    match matcher {
        Matcher::Page(page) => pages.push(PageEntry {
            url: url.to_owned(),
            section: section.map(str::to_owned),
            page,
        }),
        Matcher::Map(map) => collect_pages(map, url, section, pages),
        Matcher::WithData { data, inner } => {
            let section = data
                .get(SECTION_TITLE_KEY)
                .and_then(|v| v.as_str())
                .or(section);
            collect_matcher(inner, url, section, pages);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use navidocs_content::MockContentSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::metadata::PageMeta;
    use crate::page::{PageFactory, SiteOptions};

    static_assertions::assert_impl_all!(Site: Send, Sync);

    fn site_with(source: MockContentSource) -> Site {
        let factory = PageFactory::new(Arc::new(source), SiteOptions::default());
        let guides = RouteMap::builder()
            .page(
                "/getting-started",
                factory.page("guides/getting-started", PageMeta::titled("Getting Started")),
            )
            .page(
                "/nested-views",
                factory.page(
                    "guides/nested-views",
                    PageMeta::titled("Nested Routes and Views").description("Nested views."),
                ),
            )
            .build()
            .unwrap();
        let routes = RouteMap::builder()
            .page(
                "/",
                factory
                    .page(
                        "start-here",
                        PageMeta::titled("Navi")
                            .nav_title("Start Here")
                            .without_nav_table_of_contents(),
                    )
                    .translation("ja", PageMeta::default().nav_title("ここで始める")),
            )
            .page("/motivation", factory.page("motivation", PageMeta::titled("Motivation")))
            .section("/guides", "Guides", guides)
            .build()
            .unwrap();
        Site::new(routes)
    }

    fn site() -> Site {
        site_with(MockContentSource::new())
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(""), "/");
        assert_eq!(normalize_url("/"), "/");
        assert_eq!(normalize_url("guides//nested-views/"), "/guides/nested-views");
        assert_eq!(normalize_url("/motivation?lang=ja#top"), "/motivation");
    }

    #[test]
    fn test_match_root() {
        let site = site();

        let matched = site.match_route("/").unwrap();

        assert_eq!(matched.page.document(), "start-here");
        assert!(matched.data.is_empty());
    }

    #[test]
    fn test_match_top_level_page() {
        let matched = site().match_route("/motivation/").map(|m| m.url);

        assert_eq!(matched.as_deref(), Some("/motivation"));
    }

    #[test]
    fn test_match_nested_section_route() {
        let site = site();

        let matched = site.match_route("/guides/nested-views").unwrap();

        assert_eq!(matched.page.document(), "guides/nested-views");
        assert_eq!(matched.section_title(), Some("Guides"));
        assert_eq!(matched.url, "/guides/nested-views");
    }

    #[test]
    fn test_match_misses() {
        let site = site();

        assert!(site.match_route("/guides").is_none());
        assert!(site.match_route("/guides/unknown").is_none());
        assert!(site.match_route("/motivation/extra").is_none());
        assert!(site.match_route("/motivationx").is_none());
    }

    #[test]
    fn test_resolve_merges_section_data() {
        let site = site();

        let resolved = site
            .resolve("/guides/nested-views", &RouteContext::default())
            .unwrap();

        assert_eq!(resolved.title.as_deref(), Some("Nested Routes and Views – Navi"));
        assert_eq!(resolved.data["sectionTitle"], "Guides");
        assert_eq!(resolved.data["title"], "Nested Routes and Views");
        assert_eq!(resolved.data["translations"], serde_json::json!(["en"]));
        assert_eq!(resolved.head.unwrap().content, "Nested views.");
    }

    #[test]
    fn test_resolve_unknown_url() {
        assert!(site().resolve("/nope", &RouteContext::default()).is_none());
    }

    #[test]
    fn test_view_for_url() {
        let site = site_with(MockContentSource::new().with_document("motivation", "en", "Why"));

        let view = tokio_test::block_on(site.view("/motivation", &RouteContext::default()))
            .unwrap()
            .unwrap();
        let missing =
            tokio_test::block_on(site.view("/missing", &RouteContext::default())).unwrap();

        assert_eq!(view.module.content, "Why");
        assert!(missing.is_none());
    }

    #[test]
    fn test_view_content_error() {
        let result = tokio_test::block_on(site().view("/motivation", &RouteContext::default()));

        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_pages_in_declaration_order() {
        let site = site();

        let pages: Vec<_> = site
            .pages()
            .into_iter()
            .map(|p| (p.url, p.section))
            .collect();

        assert_eq!(
            pages,
            vec![
                ("/".to_owned(), None),
                ("/motivation".to_owned(), None),
                ("/guides/getting-started".to_owned(), Some("Guides".to_owned())),
                ("/guides/nested-views".to_owned(), Some("Guides".to_owned())),
            ]
        );
    }

    #[test]
    fn test_navigation_groups_sections() {
        let navigation = site().navigation(None);

        assert_eq!(navigation.items.len(), 2);
        assert_eq!(navigation.items[0].title, Some(Fragment::text("Start Here")));
        assert!(!navigation.items[0].table_of_contents);
        assert_eq!(navigation.items[1].title, Some(Fragment::text("Motivation")));
        assert!(navigation.items[1].table_of_contents);
        assert_eq!(navigation.sections.len(), 1);
        assert_eq!(navigation.sections[0].title, "Guides");
        assert_eq!(navigation.sections[0].items[1].url, "/guides/nested-views");
    }

    #[test]
    fn test_navigation_localized() {
        let navigation = site().navigation(Some("ja"));

        assert_eq!(
            navigation.items[0].title,
            Some(Fragment::text("ここで始める"))
        );
        assert_eq!(navigation.items[1].title, Some(Fragment::text("Motivation")));
    }

    #[test]
    fn test_navigation_serialization() {
        let json = serde_json::to_value(site().navigation(None)).unwrap();

        assert_eq!(json["items"][0]["url"], "/");
        assert_eq!(json["items"][0]["tableOfContents"], false);
        assert_eq!(json["sections"][0]["title"], "Guides");
    }
}
