//! Route tables.
//!
//! A [`RouteMap`] maps path keys (`"/"`, `"/guides"`, `"/getting-started"`)
//! to [`Matcher`]s. Nesting a map under a key mounts every route of the inner
//! map below that prefix, and [`Matcher::WithData`] attaches a data record
//! (such as the section title) to every route beneath it.
//!
//! Tables are built once, either in code through [`RouteMapBuilder`] or from
//! YAML with [`RouteMap::from_yaml`], and are immutable afterwards.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::metadata::PageMeta;
use crate::page::{Page, PageFactory};

/// Data record key holding a section's display title.
pub const SECTION_TITLE_KEY: &str = "sectionTitle";

/// Data record attached to routes.
pub type DataRecord = serde_json::Map<String, serde_json::Value>;

/// Error building or loading a route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The same key appears twice in one table.
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// A key is not a valid path segment sequence.
    #[error("Invalid route path {path:?}: {reason}")]
    InvalidPath {
        /// Offending key.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A YAML entry is neither a page nor a section.
    #[error("Invalid route entry {path:?}: {reason}")]
    InvalidEntry {
        /// Key of the entry.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The YAML document could not be parsed.
    #[error("Failed to parse route table: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Descriptor of what a route key resolves to.
#[derive(Clone, Debug)]
pub enum Matcher {
    /// A single page.
    Page(Page),
    /// A nested table mounted below the key.
    Map(RouteMap),
    /// Attach `data` to every route matched by `inner`.
    WithData {
        /// Data record merged into the route data.
        data: DataRecord,
        /// Wrapped matcher.
        inner: Box<Matcher>,
    },
}

impl Matcher {
    /// Wrap a matcher with a data record.
    #[must_use]
    pub fn with_data(data: DataRecord, inner: Matcher) -> Self {
        Self::WithData {
            data,
            inner: Box::new(inner),
        }
    }

    /// A nested table whose routes all carry `sectionTitle`.
    #[must_use]
    pub fn section(title: impl Into<String>, routes: RouteMap) -> Self {
        let mut data = DataRecord::new();
        data.insert(
            SECTION_TITLE_KEY.to_owned(),
            serde_json::Value::String(title.into()),
        );
        Self::with_data(data, Self::Map(routes))
    }
}

/// An ordered table of uniquely keyed matchers.
#[derive(Clone, Debug, Default)]
pub struct RouteMap {
    entries: Vec<(String, Matcher)>,
}

impl RouteMap {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> RouteMapBuilder {
        RouteMapBuilder::default()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Matcher)> {
        self.entries.iter().map(|(key, matcher)| (key.as_str(), matcher))
    }

    /// Look up the matcher for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Matcher> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, matcher)| matcher)
    }

    /// Number of entries in this table (not counting nested tables).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a table from YAML.
    ///
    /// The document is a list of entries. A page entry has `path`,
    /// `document`, optional `meta` and optional `translations` (language code
    /// to metadata overrides). A section entry has `path`, `section` (its
    /// title), optional `data` and nested `routes`; without `section` the
    /// nested routes are mounted as a plain table.
    ///
    /// ```yaml
    /// - path: /
    ///   document: start-here
    ///   meta:
    ///     title: Navi
    ///   translations:
    ///     ja:
    ///       navTitle: ここで始める
    /// - path: /guides
    ///   section: Guides
    ///   routes:
    ///     - path: /getting-started
    ///       document: guides/getting-started
    ///       meta:
    ///         title: Getting Started
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Parse`] for malformed YAML and the other
    /// variants for structurally invalid tables.
    pub fn from_yaml(text: &str, factory: &PageFactory) -> Result<Self, RouteError> {
        let entries: Vec<RouteEntry> = serde_yaml::from_str(text)?;
        build_entries(entries, factory)
    }
}

/// Builder for [`RouteMap`].
#[derive(Debug, Default)]
pub struct RouteMapBuilder {
    entries: Vec<(String, Matcher)>,
}

impl RouteMapBuilder {
    /// Add an arbitrary matcher.
    #[must_use]
    pub fn route(mut self, key: impl Into<String>, matcher: Matcher) -> Self {
        self.entries.push((key.into(), matcher));
        self
    }

    /// Add a page.
    #[must_use]
    pub fn page(self, key: impl Into<String>, page: Page) -> Self {
        self.route(key, Matcher::Page(page))
    }

    /// Add a titled section.
    #[must_use]
    pub fn section(self, key: impl Into<String>, title: impl Into<String>, routes: RouteMap) -> Self {
        self.route(key, Matcher::section(title, routes))
    }

    /// Validate keys and produce the table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPath`] for malformed keys and
    /// [`RouteError::DuplicatePath`] when a key repeats.
    pub fn build(self) -> Result<RouteMap, RouteError> {
        let mut seen = HashSet::new();
        for (key, _) in &self.entries {
            validate_key(key)?;
            if !seen.insert(key.as_str()) {
                return Err(RouteError::DuplicatePath(key.clone()));
            }
        }
        Ok(RouteMap {
            entries: self.entries,
        })
    }
}

fn validate_key(key: &str) -> Result<(), RouteError> {
    let invalid = |reason| {
        Err(RouteError::InvalidPath {
            path: key.to_owned(),
            reason,
        })
    };

    if !key.starts_with('/') {
        return invalid("must start with '/'");
    }
    if key == "/" {
        return Ok(());
    }
    if key.ends_with('/') {
        return invalid("must not end with '/'");
    }
    if key.contains("//") {
        return invalid("must not contain empty segments");
    }
    if key.chars().any(char::is_whitespace) {
        return invalid("must not contain whitespace");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteEntry {
    path: String,
    #[serde(default)]
    document: Option<String>,
    #[serde(default)]
    meta: PageMeta,
    #[serde(default)]
    translations: BTreeMap<String, PageMeta>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    data: DataRecord,
    #[serde(default)]
    routes: Option<Vec<RouteEntry>>,
}

fn build_entries(entries: Vec<RouteEntry>, factory: &PageFactory) -> Result<RouteMap, RouteError> {
    let mut builder = RouteMap::builder();
    for entry in entries {
        let (key, matcher) = build_entry(entry, factory)?;
        builder = builder.route(key, matcher);
    }
    builder.build()
}

fn build_entry(entry: RouteEntry, factory: &PageFactory) -> Result<(String, Matcher), RouteError> {
    let invalid = |reason| RouteError::InvalidEntry {
        path: entry.path.clone(),
        reason,
    };

    match (entry.document, entry.routes) {
        (Some(_), Some(_)) => Err(invalid("has both 'document' and 'routes'")),
        (None, None) => Err(invalid("needs either 'document' or 'routes'")),
        (Some(document), None) => {
            if entry.section.is_some() || !entry.data.is_empty() {
                return Err(invalid("'section' and 'data' apply to nested routes only"));
            }
            let page = entry
                .translations
                .into_iter()
                .fold(factory.page(document, entry.meta), |page, (language, meta)| {
                    page.translation(language, meta)
                });
            Ok((entry.path, Matcher::Page(page)))
        }
        (None, Some(routes)) => {
            if !entry.meta.is_empty() || !entry.translations.is_empty() {
                return Err(invalid("'meta' and 'translations' apply to pages only"));
            }
            let map = Matcher::Map(build_entries(routes, factory)?);
            let mut data = entry.data;
            if let Some(title) = entry.section {
                data.insert(
                    SECTION_TITLE_KEY.to_owned(),
                    serde_json::Value::String(title),
                );
            }
            let matcher = if data.is_empty() {
                map
            } else {
                Matcher::with_data(data, map)
            };
            Ok((entry.path, matcher))
        }
    }
}
