//! YAML front matter parsing for document files.
//!
//! A document may start with a `---` fenced YAML block declaring its exports:
//!
//! ```text
//! ---
//! demoboardHelpers:
//!   App.js: "export default () => null"
//! readingTime: 4
//! ---
//! # Document title
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::toc::TocEntry;

/// Exports declared in a document's front matter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FrontMatter {
    pub demoboard_helpers: Option<serde_json::Value>,
    pub table_of_contents: Option<Vec<TocEntry>>,
    pub filename: Option<String>,
    #[serde(flatten)]
    pub exports: BTreeMap<String, serde_json::Value>,
}

/// Front matter parse error.
#[derive(Debug, thiserror::Error)]
#[error("Invalid front matter: {0}")]
pub(crate) struct FrontMatterError(String);

/// Split a document into its front matter and body.
///
/// Documents without a leading `---` line have empty front matter and are
/// returned whole. An unterminated block is treated as body text.
///
/// # Errors
///
/// Returns an error if the fenced block is not valid YAML.
pub(crate) fn split_front_matter(text: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return Ok((FrontMatter::default(), text));
    };

    let Some((yaml, body)) = find_closing_fence(rest) else {
        return Ok((FrontMatter::default(), text));
    };

    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let front_matter =
        serde_yaml::from_str(trimmed).map_err(|e| FrontMatterError(e.to_string()))?;
    Ok((front_matter, body))
}

/// Find the closing `---` line, returning (yaml, body after the fence).
fn find_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
