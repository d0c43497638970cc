//! The route table of the Navi documentation website.

use crate::metadata::PageMeta;
use crate::page::PageFactory;
use crate::route_map::{RouteError, RouteMap};

/// Build the Navi documentation route table.
///
/// # Errors
///
/// Only fails if the table itself is malformed, which the tests rule out.
pub fn navi_routes(factory: &PageFactory) -> Result<RouteMap, RouteError> {
    RouteMap::builder()
        .page(
            "/",
            factory
                .page(
                    "start-here",
                    PageMeta::titled("Navi")
                        .html_title("Navi – A library for mapping URLs to content")
                        .nav_title("Start Here")
                        .description(
                            "Create big, fast, CDN-delivered websites with great SEO & SMO, \
                             and all with vanilla create-react-app.",
                        )
                        .social_image("social-media-card.png")
                        .without_nav_table_of_contents(),
                )
                .translation("ja", PageMeta::default().nav_title("ここで始める")),
        )
        .page(
            "/motivation",
            factory
                .page(
                    "motivation",
                    PageMeta::titled("The Motivation For Navi 🌏")
                        .html_title("The Motivation For Navi")
                        .without_nav_table_of_contents()
                        .nav_title("Motivation")
                        .description(
                            "Navi lets you create big, fast, CDN-delivered apps with great \
                             SEO & SMO — and all with vanilla create-react-app.",
                        ),
                )
                .translation("ja", PageMeta::default().nav_title("Motivation")),
        )
        .page(
            "/comparisons",
            factory.page(
                "comparison",
                PageMeta::titled("Is Navi For Me❓")
                    .html_title("Is Navi For Me?")
                    .nav_title("Comparison With Similar Tools")
                    .description(
                        "Navi is small routing library that gives you many of the benefits \
                         of larger frameworks.",
                    )
                    .blurb(
                        "Navi is small routing library that — when combined with the rest \
                         of the React ecosystem — gives you many of the benefits of larger \
                         frameworks.",
                    ),
            ),
        )
        .page(
            "/create-react-navi-app",
            factory.page(
                "create-react-navi-app",
                PageMeta::titled("Create A New App ✨")
                    .html_title("Create A New App – Navi")
                    .nav_title("Create a New App")
                    .description(
                        "Zero-configuration React apps with ready-to-go routing, MDX support, \
                         and static HTML generation.",
                    )
                    .blurb(
                        "Add Navi to your create-react-app project in three steps, or get a \
                         head start with one of Navi’s starter kits.",
                    )
                    .social_image("create-react-navi-app/social.png"),
            ),
        )
        .section("/guides", "Guides", guides(factory)?)
        .section("/reference", "API Reference", reference(factory)?)
        .section("/integrations", "Usage with...", integrations(factory)?)
        .section("/deploy", "Deploy with...", deploy(factory)?)
        .build()
}

fn guides(factory: &PageFactory) -> Result<RouteMap, RouteError> {
    RouteMap::builder()
        .page(
            "/getting-started",
            factory.page(
                "guides/getting-started",
                PageMeta::titled("Getting Started").description(
                    "Navi lets you use React’s Suspense, Hooks and Error Boundary APIs to \
                     handle routing declaratively, and asynchronously.",
                ),
            ),
        )
        .page(
            "/url-parameters",
            factory.page(
                "guides/url-parameters",
                PageMeta::titled("URL Parameters").description(
                    "URL parameters let you create routes that fetch data based on the URL, \
                     and pass it directly to the view.",
                ),
            ),
        )
        .page(
            "/requests-routes-matchers",
            factory.page(
                "guides/requests-routes-matchers",
                PageMeta::titled("Requests, Routes and Matchers").description(
                    "At its core, Navi is just a tool for mapping Requests to Routes; to \
                     accomplish this, it uses a pattern called Matchers.",
                ),
            ),
        )
        .page(
            "/nested-views",
            factory.page(
                "guides/nested-views",
                PageMeta::titled("Nested Routes and Views").description(
                    "Learn to add nested views and layouts to your routes, allowing you to \
                     create entire apps that can be embedded anywhere.",
                ),
            ),
        )
        .page(
            "/programmatic-navigation",
            factory.page(
                "guides/programmatic-navigation",
                PageMeta::titled("Programmatic Navigation"),
            ),
        )
        .page(
            "/routing-context",
            factory.page("guides/context", PageMeta::titled("Routing Context")),
        )
        .page(
            "/authenticated-routes",
            factory.page(
                "guides/authenticated-routes",
                PageMeta::titled("Authenticated Routes").description(
                    "Add authenticated routes to your statically rendered site, complete with \
                     redirects to and from the login screen.",
                ),
            ),
        )
        .page(
            "/static-rendering",
            factory.page(
                "guides/static-rendering",
                PageMeta::titled("Static Rendering"),
            ),
        )
        .page(
            "/setting-head-meta-title",
            factory.page(
                "guides/setting-head-meta-title",
                PageMeta::titled_html(
                    "SEO with <code>&lt;meta&gt;</code> and <code>&lt;title&gt;</code>",
                )
                .html_title("Setting head, title and meta tags")
                .nav_title_html("Setting <code>meta</code> and <code>title</code>"),
            ),
        )
        .build()
}

fn reference(factory: &PageFactory) -> Result<RouteMap, RouteError> {
    RouteMap::builder()
        .page(
            "/react-components-hooks",
            factory.page(
                "reference/react-components-hooks",
                PageMeta::titled("Components and Hooks"),
            ),
        )
        .page(
            "/history",
            factory.page(
                "reference/history",
                PageMeta::titled("Navi's history object").nav_title_html("<code>history</code>"),
            ),
        )
        .page(
            "/matchers",
            factory.page("reference/matchers", PageMeta::titled("Matchers")),
        )
        .page(
            "/navigation",
            factory.page(
                "reference/navigation",
                PageMeta::titled("The Navigation object")
                    .nav_title_html("<code>navigation</code>"),
            ),
        )
        .page(
            "/router",
            factory.page(
                "reference/router",
                PageMeta::titled("Router objects").nav_title_html("<code>router</code>"),
            ),
        )
        .page(
            "/data-types",
            factory.page("reference/data-types", PageMeta::titled("Types")),
        )
        .build()
}

fn integrations(factory: &PageFactory) -> Result<RouteMap, RouteError> {
    // TODO: add an express integration page once its document is written.
    RouteMap::builder()
        .page(
            "/react-router",
            factory.page(
                "integrations/react-router",
                PageMeta::titled("Using Navi with react-router").nav_title("react-router"),
            ),
        )
        .page(
            "/react-helmet",
            factory.page(
                "integrations/react-helmet",
                PageMeta::titled("Using Navi with react-helmet").nav_title("react-helmet"),
            ),
        )
        .build()
}

fn deploy(factory: &PageFactory) -> Result<RouteMap, RouteError> {
    RouteMap::builder()
        .page(
            "/netlify",
            factory.page(
                "deploy/netlify",
                PageMeta::titled("Deploying Navi with Netlify").nav_title("Deploy with Netlify"),
            ),
        )
        .page(
            "/now",
            factory.page(
                "deploy/now",
                PageMeta::titled("Deploying Navi with ZEIT Now").nav_title("Deploy with ZEIT Now"),
            ),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use navidocs_content::MockContentSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Fragment;
    use crate::page::{RouteContext, RouteRequest, SiteOptions};
    use crate::site::Site;

    fn navi_site(source: MockContentSource) -> Site {
        let factory = PageFactory::new(Arc::new(source), SiteOptions::default());
        Site::new(navi_routes(&factory).unwrap())
    }

    fn site() -> Site {
        navi_site(MockContentSource::new())
    }

    #[test]
    fn test_every_page_is_listed() {
        let urls: Vec<_> = site().pages().into_iter().map(|p| p.url).collect();

        assert_eq!(urls.len(), 23);
        assert_eq!(urls[0], "/");
        assert!(urls.contains(&"/guides/setting-head-meta-title".to_owned()));
        assert!(urls.contains(&"/reference/data-types".to_owned()));
        assert_eq!(urls[22], "/deploy/now");
    }

    #[test]
    fn test_documents_differ_from_urls() {
        let site = site();

        assert_eq!(
            site.match_route("/comparisons").unwrap().page.document(),
            "comparison"
        );
        assert_eq!(
            site.match_route("/guides/routing-context")
                .unwrap()
                .page
                .document(),
            "guides/context"
        );
    }

    #[test]
    fn test_sections() {
        let navigation = site().navigation(None);
        let titles: Vec<_> = navigation.sections.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(navigation.items.len(), 4);
        assert_eq!(
            titles,
            vec!["Guides", "API Reference", "Usage with...", "Deploy with..."]
        );
        assert_eq!(navigation.sections[0].items.len(), 9);
        assert_eq!(navigation.sections[1].items.len(), 6);
    }

    #[test]
    fn test_root_page_in_japanese() {
        let site = site();
        let matched = site.match_route("/").unwrap();

        let data = matched
            .page
            .data(&matched.request(), &RouteContext::for_language("ja"));

        assert_eq!(data.nav_title, Some(Fragment::text("ここで始める")));
        assert_eq!(data.title, Some(Fragment::text("Navi")));
        assert_eq!(
            data.html_title.as_deref(),
            Some("Navi – A library for mapping URLs to content")
        );
        assert_eq!(data.translations, vec!["en", "ja"]);
        assert_eq!(data.nav_table_of_contents, Some(false));
        assert_eq!(data.social_image_url.as_deref(), Some("social-media-card.png"));
    }

    #[test]
    fn test_default_language_blurb_and_head() {
        let site = site();
        let matched = site.match_route("/guides/nested-views").unwrap();
        let request = RouteRequest::new(matched.url.clone());

        let data = matched.page.data(&request, &RouteContext::default());
        let head = matched.page.head(&request, &RouteContext::default()).unwrap();

        assert_eq!(
            data.html_title.as_deref(),
            Some("Nested Routes and Views – Navi")
        );
        assert_eq!(
            data.blurb.map(|b| b.to_html()).as_deref(),
            Some(
                "<p>Learn to add nested views and layouts to your routes, allowing you to \
                 create entire apps that can be embedded anywhere.</p>"
            )
        );
        assert_eq!(head.name, "description");
        assert_eq!(data.translations, vec!["en"]);
    }

    #[test]
    fn test_declared_blurb_wins_over_description() {
        let resolved = site()
            .resolve("/create-react-navi-app", &RouteContext::default())
            .unwrap();

        assert_eq!(
            resolved.data["blurb"]["html"],
            "<p>Add Navi to your create-react-app project in three steps, or get a head \
             start with one of Navi’s starter kits.</p>"
        );
        assert_eq!(resolved.title.as_deref(), Some("Create A New App – Navi"));
    }

    #[test]
    fn test_page_without_description() {
        let resolved = site()
            .resolve("/reference/matchers", &RouteContext::default())
            .unwrap();

        assert!(resolved.head.is_none());
        assert!(resolved.data.get("blurb").is_none());
        assert_eq!(resolved.title.as_deref(), Some("Matchers – Navi"));
        assert_eq!(resolved.data["sectionTitle"], "API Reference");
    }

    #[test]
    fn test_markup_nav_title() {
        let navigation = site().navigation(None);
        let history = &navigation.sections[1].items[1];

        assert_eq!(history.url, "/reference/history");
        assert_eq!(history.title, Some(Fragment::html("<code>history</code>")));
    }

    #[test]
    fn test_markup_title_html_title_declared() {
        let resolved = site()
            .resolve("/guides/setting-head-meta-title", &RouteContext::default())
            .unwrap();

        assert_eq!(
            resolved.title.as_deref(),
            Some("Setting head, title and meta tags")
        );
    }

    #[test]
    fn test_missing_translation_falls_back() {
        let source = MockContentSource::new().with_document("motivation", "en", "Motivation");
        let site = navi_site(source);

        let view = tokio_test::block_on(site.view("/motivation", &RouteContext::for_language("ja")))
            .unwrap()
            .unwrap();

        assert!(view.is_translation_missing);
        assert_eq!(view.module.filename.as_deref(), Some("motivation/document.en.md"));
    }

    #[test]
    fn test_yaml_table_matches_builtin() {
        let yaml = r"
- path: /
  document: start-here
  meta:
    title: Navi
    htmlTitle: Navi – A library for mapping URLs to content
    navTitle: Start Here
    description: Create big, fast, CDN-delivered websites with great SEO & SMO, and all with vanilla create-react-app.
    socialImageURL: social-media-card.png
    navTableOfContents: false
  translations:
    ja:
      navTitle: ここで始める
- path: /reference
  section: API Reference
  routes:
    - path: /history
      document: reference/history
      meta:
        title: Navi's history object
        navTitle:
          html: <code>history</code>
";
        let factory = PageFactory::new(Arc::new(MockContentSource::new()), SiteOptions::default());
        let from_yaml = Site::new(RouteMap::from_yaml(yaml, &factory).unwrap());
        let builtin = site();

        for url in ["/", "/reference/history"] {
            for language in ["en", "ja", "fr"] {
                let context = RouteContext::for_language(language);
                assert_eq!(
                    from_yaml.resolve(url, &context),
                    builtin.resolve(url, &context),
                    "{url} ({language})"
                );
            }
        }
    }
}
