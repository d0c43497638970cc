//! Table of contents extraction from markdown headings.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Build a table of contents from the `##`..`######` headings of a document.
///
/// The first-level heading is the page title and is never listed. Anchor IDs
/// are slugs of the heading text, suffixed with `-1`, `-2`, ... on repeats.
#[must_use]
pub fn extract_toc(markdown: &str) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut id_counts: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) if level != HeadingLevel::H1 => {
                current = Some((heading_level_to_num(level), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current.take() {
                    let title = title.trim().to_owned();
                    let base_id = slugify(&title);
                    let count = id_counts.entry(base_id.clone()).or_default();
                    let id = match *count {
                        0 => base_id,
                        n => format!("{base_id}-{n}"),
                    };
                    *count += 1;
                    toc.push(TocEntry { level, title, id });
                }
            }
            _ => {}
        }
    }

    toc
}

/// Convert heading text to a URL-safe anchor slug.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
