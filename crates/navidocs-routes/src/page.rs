//! The `page` route handler.
//!
//! A [`Page`] ties one document to its default metadata and per-language
//! overrides, and answers the four questions the hosting framework asks of
//! every route: its data, its browser title, its `<head>` elements and its
//! view. Pages are created through a [`PageFactory`], which supplies the
//! shared content source and site options.

use std::collections::BTreeMap;
use std::sync::Arc;

use navidocs_content::{BoxFuture, ContentError, ContentModule, ContentSource};
use serde::Serialize;

use crate::fragment::{Fragment, escape_html};
use crate::metadata::{PageData, PageMeta, merge_meta};

/// Registry of components made available to documents, keyed by name.
pub type ComponentRegistry = BTreeMap<String, serde_json::Value>;

/// Site-wide settings shared by every page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteOptions {
    /// Language used when a request names none, and the translation fallback.
    pub base_language: String,
    /// Suffix of synthesized browser titles (`"{title} – {site_name}"`).
    pub site_name: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            base_language: "en".to_owned(),
            site_name: "Navi".to_owned(),
        }
    }
}

/// Per-request information about the matched URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteRequest {
    /// URL the route is mounted at (e.g., "/guides/nested-views").
    pub mountpath: String,
}

impl RouteRequest {
    /// Create a request for a mount path.
    #[must_use]
    pub fn new(mountpath: impl Into<String>) -> Self {
        Self {
            mountpath: mountpath.into(),
        }
    }
}

/// Asynchronous provider of the document component registry.
pub trait DocumentComponents: Send + Sync {
    /// Fetch the registry for the current request.
    fn components(&self) -> BoxFuture<'_, ComponentRegistry>;
}

/// A fixed component registry.
#[derive(Clone, Debug, Default)]
pub struct StaticComponents(pub ComponentRegistry);

impl DocumentComponents for StaticComponents {
    fn components(&self) -> BoxFuture<'_, ComponentRegistry> {
        let registry = self.0.clone();
        Box::pin(async move { registry })
    }
}

/// Per-request context supplied by the host.
#[derive(Clone, Default)]
pub struct RouteContext {
    /// Requested language; the base language when `None`.
    pub language: Option<String>,
    /// Provider of the document component registry.
    pub document_components: Option<Arc<dyn DocumentComponents>>,
}

impl RouteContext {
    /// Context for a specific language.
    #[must_use]
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            document_components: None,
        }
    }

    /// Attach a document component provider.
    #[must_use]
    pub fn with_document_components(mut self, provider: Arc<dyn DocumentComponents>) -> Self {
        self.document_components = Some(provider);
        self
    }
}

impl std::fmt::Debug for RouteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteContext")
            .field("language", &self.language)
            .field("document_components", &self.document_components.is_some())
            .finish()
    }
}

/// An element to place in the document `<head>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    /// `name` attribute of the meta element.
    pub name: String,
    /// `content` attribute of the meta element.
    pub content: String,
}

impl HeadTag {
    /// Render as a `<meta>` element.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<meta name="{}" content="{}">"#,
            escape_html(&self.name),
            escape_html(&self.content)
        )
    }
}

/// Everything the view layer needs to render a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Exports of the resolved document.
    #[serde(flatten)]
    pub module: ContentModule,
    /// True when the requested translation was unavailable and the base
    /// language document was served instead.
    pub is_translation_missing: bool,
    /// Components made available to the document.
    pub document_components: ComponentRegistry,
}

/// Builds [`Page`]s that share a content source and site options.
#[derive(Clone)]
pub struct PageFactory {
    source: Arc<dyn ContentSource>,
    options: Arc<SiteOptions>,
}

impl PageFactory {
    /// Create a factory.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, options: SiteOptions) -> Self {
        Self {
            source,
            options: Arc::new(options),
        }
    }

    /// Site options handed to every page.
    #[must_use]
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    /// Create a page for `document` with default metadata.
    #[must_use]
    pub fn page(&self, document: impl Into<String>, default: PageMeta) -> Page {
        Page {
            document: document.into(),
            default,
            translations: BTreeMap::new(),
            source: Arc::clone(&self.source),
            options: Arc::clone(&self.options),
        }
    }
}

/// Route handler for one document.
#[derive(Clone)]
pub struct Page {
    document: String,
    default: PageMeta,
    translations: BTreeMap<String, PageMeta>,
    source: Arc<dyn ContentSource>,
    options: Arc<SiteOptions>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .field("default", &self.default)
            .field("translations", &self.translations)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Add metadata overrides for a language.
    #[must_use]
    pub fn translation(mut self, language: impl Into<String>, meta: PageMeta) -> Self {
        self.translations.insert(language.into(), meta);
        self
    }

    /// Document key this page resolves.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Default metadata.
    #[must_use]
    pub fn default_meta(&self) -> &PageMeta {
        &self.default
    }

    /// Languages with metadata overrides, excluding the base language.
    pub fn override_languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Languages this page is available in: the base language first, then
    /// every override language, without duplicates.
    #[must_use]
    pub fn translations(&self) -> Vec<String> {
        let base = &self.options.base_language;
        std::iter::once(base.clone())
            .chain(self.translations.keys().filter(|l| *l != base).cloned())
            .collect()
    }

    /// Active language for a request.
    #[must_use]
    pub fn language<'a>(&'a self, context: &'a RouteContext) -> &'a str {
        context
            .language
            .as_deref()
            .unwrap_or(&self.options.base_language)
    }

    /// Resolve the page metadata for a request.
    ///
    /// Merges the override for the active language over the defaults, then
    /// fills in `html_title` from `title` and `blurb` from `description`, and
    /// wraps a plain-text blurb in a paragraph.
    #[must_use]
    pub fn data(&self, _request: &RouteRequest, context: &RouteContext) -> PageData {
        let language = self.language(context);
        let meta = match self.translations.get(language) {
            Some(overlay) => merge_meta(&self.default, overlay),
            None => self.default.clone(),
        };

        let html_title = meta.html_title.filter(|s| !s.is_empty()).or_else(|| {
            meta.title
                .as_ref()
                .map(|title| format!("{} – {}", title.plain_text(), self.options.site_name))
        });

        // Empty strings count as absent.
        let blurb = meta
            .blurb
            .filter(|blurb| !matches!(blurb, Fragment::Text(text) if text.is_empty()))
            .or_else(|| {
                meta.description
                    .clone()
                    .filter(|s| !s.is_empty())
                    .map(Into::into)
            })
            .map(Fragment::into_paragraph);

        PageData {
            title: meta.title,
            html_title,
            nav_title: meta.nav_title,
            description: meta.description,
            blurb,
            social_image_url: meta.social_image_url,
            nav_table_of_contents: meta.nav_table_of_contents,
            translations: self.translations(),
        }
    }

    /// Browser title for a request.
    #[must_use]
    pub fn title(&self, request: &RouteRequest, context: &RouteContext) -> Option<String> {
        self.data(request, context).html_title
    }

    /// `<head>` elements for a request: a description meta tag, if any.
    #[must_use]
    pub fn head(&self, request: &RouteRequest, context: &RouteContext) -> Option<HeadTag> {
        self.data(request, context)
            .description
            .filter(|s| !s.is_empty())
            .map(|content| HeadTag {
                name: "description".to_owned(),
                content,
            })
    }

    /// Resolve the document for a request.
    ///
    /// When the document for the active language cannot be resolved, the base
    /// language document is served instead and `is_translation_missing` is
    /// set. A module without a `filename` is logged but still served.
    ///
    /// # Errors
    ///
    /// Returns the [`ContentError`] of the base language document if it can't
    /// be resolved either.
    pub async fn view(
        &self,
        request: &RouteRequest,
        context: &RouteContext,
    ) -> Result<PageView, ContentError> {
        let language = self.language(context);
        let base = self.options.base_language.as_str();

        let (mut module, is_translation_missing) =
            match self.source.resolve(&self.document, language).await {
                Ok(module) => (module, false),
                Err(err) if language != base => {
                    tracing::debug!(
                        document = %self.document,
                        language,
                        error = %err,
                        "Translation unavailable, serving base language"
                    );
                    (self.source.resolve(&self.document, base).await?, true)
                }
                Err(err) => return Err(err),
            };

        if module.filename.is_none() {
            tracing::warn!(
                url = %request.mountpath,
                document = %self.document,
                "Content should export a \"filename\" string"
            );
        }

        // Fields set by the view take precedence over same-named exports.
        module.exports.remove("content");
        module.exports.remove("isTranslationMissing");
        module.exports.remove("documentComponents");

        let document_components = match &context.document_components {
            Some(provider) => provider.components().await,
            None => ComponentRegistry::new(),
        };

        Ok(PageView {
            module,
            is_translation_missing,
            document_components,
        })
    }
}
