//! Page metadata and per-language overrides.
//!
//! Provides [`PageMeta`] for the metadata a page declares (its `default`
//! record and one override record per language), [`merge_meta`] for
//! layering an override on top of the defaults, and [`PageData`] for the
//! resolved record handed to the view layer.
//!
//! # Merge Rules
//!
//! Merging is shallow: every field set in the override replaces the default,
//! every field left unset falls back to the default. There is no deep merge.

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;

/// Metadata declared by a page, either as its default or as a translation.
///
/// All fields are optional. When a field is `None`, it indicates the
/// metadata was not explicitly set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Heading shown at the top of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Fragment>,

    /// Text of the browser `<title>` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_title: Option<String>,

    /// Shorter title used in navigation menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_title: Option<Fragment>,

    /// Page description for search engines and link previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Introductory content shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<Fragment>,

    /// Image used for social media cards.
    #[serde(
        default,
        rename = "socialImageURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_image_url: Option<String>,

    /// Whether the navigation shows this page's table of contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_table_of_contents: Option<bool>,
}

impl PageMeta {
    /// Metadata with only a plain-text title set.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(Fragment::text(title)),
            ..Default::default()
        }
    }

    /// Metadata with only a markup title set.
    #[must_use]
    pub fn titled_html(html: impl Into<String>) -> Self {
        Self {
            title: Some(Fragment::html(html)),
            ..Default::default()
        }
    }

    /// Set the browser title.
    #[must_use]
    pub fn html_title(mut self, html_title: impl Into<String>) -> Self {
        self.html_title = Some(html_title.into());
        self
    }

    /// Set a plain-text navigation title.
    #[must_use]
    pub fn nav_title(mut self, nav_title: impl Into<String>) -> Self {
        self.nav_title = Some(Fragment::text(nav_title));
        self
    }

    /// Set a markup navigation title.
    #[must_use]
    pub fn nav_title_html(mut self, html: impl Into<String>) -> Self {
        self.nav_title = Some(Fragment::html(html));
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a plain-text blurb.
    #[must_use]
    pub fn blurb(mut self, blurb: impl Into<String>) -> Self {
        self.blurb = Some(Fragment::text(blurb));
        self
    }

    /// Set the social card image.
    #[must_use]
    pub fn social_image(mut self, url: impl Into<String>) -> Self {
        self.social_image_url = Some(url.into());
        self
    }

    /// Hide the table of contents from the navigation menu.
    #[must_use]
    pub fn without_nav_table_of_contents(mut self) -> Self {
        self.nav_table_of_contents = Some(false);
        self
    }

    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Layer `overlay` on top of `base`.
///
/// Each field set in `overlay` wins; unset fields fall back to `base`.
#[must_use]
pub fn merge_meta(base: &PageMeta, overlay: &PageMeta) -> PageMeta {
    fn pick<T: Clone>(base: Option<&T>, overlay: Option<&T>) -> Option<T> {
        overlay.or(base).cloned()
    }

    PageMeta {
        title: pick(base.title.as_ref(), overlay.title.as_ref()),
        html_title: pick(base.html_title.as_ref(), overlay.html_title.as_ref()),
        nav_title: pick(base.nav_title.as_ref(), overlay.nav_title.as_ref()),
        description: pick(base.description.as_ref(), overlay.description.as_ref()),
        blurb: pick(base.blurb.as_ref(), overlay.blurb.as_ref()),
        social_image_url: pick(
            base.social_image_url.as_ref(),
            overlay.social_image_url.as_ref(),
        ),
        nav_table_of_contents: overlay.nav_table_of_contents.or(base.nav_table_of_contents),
    }
}

/// Page metadata resolved for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Page heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Fragment>,
    /// Browser title, synthesized from `title` when not declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_title: Option<String>,
    /// Navigation title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_title: Option<Fragment>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Blurb, always markup when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blurb: Option<Fragment>,
    /// Social card image.
    #[serde(rename = "socialImageURL", skip_serializing_if = "Option::is_none")]
    pub social_image_url: Option<String>,
    /// Navigation table of contents flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_table_of_contents: Option<bool>,
    /// Languages this page is available in, base language first.
    pub translations: Vec<String>,
}

impl PageData {
    /// Navigation label: `nav_title`, falling back to `title`.
    #[must_use]
    pub fn nav_label(&self) -> Option<&Fragment> {
        self.nav_title.as_ref().or(self.title.as_ref())
    }
}
