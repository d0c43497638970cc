//! Text-or-markup values used for titles and blurbs.

use serde::{Deserialize, Serialize};

/// A piece of display content: plain text or a structured markup element.
///
/// Serializes as a bare string for text and as `{"html": "..."}` for markup,
/// and deserializes from either shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    /// Plain text, escaped when rendered.
    Text(String),
    /// Pre-built markup, rendered as is.
    Html {
        /// Markup source.
        html: String,
    },
}

impl Fragment {
    /// Create a plain-text fragment.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a markup fragment.
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html { html: html.into() }
    }

    /// Whether this fragment is already a markup element.
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Html { .. })
    }

    /// Text content with any markup tags removed.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Html { html } => strip_tags(html),
        }
    }

    /// Render the fragment as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Html { html } => html.clone(),
        }
    }

    /// Wrap plain text in a paragraph element; markup is returned unchanged.
    #[must_use]
    pub fn into_paragraph(self) -> Self {
        match self {
            Self::Text(text) => Self::html(format!("<p>{}</p>", escape_html(&text))),
            element @ Self::Html { .. } => element,
        }
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Remove tags and decode the entities produced by [`escape_html`].
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
