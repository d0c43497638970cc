//! HTTP request handlers.

pub(crate) mod navigation;
pub(crate) mod pages;

use serde::Deserialize;

/// Query string accepted by every endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LanguageQuery {
    /// Requested language code.
    pub(crate) lang: Option<String>,
}
