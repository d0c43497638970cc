//! Route table and localized page metadata for the Navi documentation site.
//!
//! This crate maps URL paths to [`Page`]s. Each page pairs a document key
//! with default metadata and per-language overrides, and resolves both on
//! demand for a [`RouteContext`]:
//!
//! - [`Page::data`] merges the active language's overrides over the defaults
//!   and synthesizes the browser title and blurb
//! - [`Page::view`] resolves the document through a
//!   [`ContentSource`](navidocs_content::ContentSource), falling back to the
//!   base language when a translation is missing
//!
//! Pages are grouped into a [`RouteMap`], either built in code (see
//! [`navi_routes`]) or loaded from YAML, and queried through a [`Site`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use navidocs_content::FsContentSource;
//! use navidocs_routes::{PageFactory, RouteContext, Site, SiteOptions, navi_routes};
//!
//! let factory = PageFactory::new(Arc::new(FsContentSource::new("content")), SiteOptions::default());
//! let site = Site::new(navi_routes(&factory)?);
//!
//! let resolved = site.resolve("/guides/nested-views", &RouteContext::for_language("ja"));
//! ```

mod fragment;
mod metadata;
mod navi;
mod page;
mod route_map;
mod site;

pub use fragment::{Fragment, escape_html};
pub use metadata::{PageData, PageMeta, merge_meta};
pub use navi::navi_routes;
pub use page::{
    ComponentRegistry, DocumentComponents, HeadTag, Page, PageFactory, PageView, RouteContext,
    RouteRequest, SiteOptions, StaticComponents,
};
pub use route_map::{DataRecord, Matcher, RouteError, RouteMap, RouteMapBuilder, SECTION_TITLE_KEY};
pub use site::{
    NavItem, NavSection, Navigation, PageEntry, ResolvedRoute, RouteMatch, Site, normalize_url,
};
