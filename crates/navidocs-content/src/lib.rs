//! Localized document resolution for the navidocs route table.
//!
//! Every page in the route table points at a *document*: a key such as
//! `"guides/getting-started"` that has one content module per language. This
//! crate provides the [`ContentSource`] capability for turning a
//! `(document, language)` pair into a [`ContentModule`], so the route table
//! never needs to know where content lives.
//!
//! # Architecture
//!
//! - [`ContentSource`] trait with a single async `resolve()` method
//! - [`FsContentSource`] reading `{root}/{document}/document.{language}.md`
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use navidocs_content::{ContentSource, FsContentSource};
//!
//! let source = FsContentSource::new("content");
//! let module = source.resolve("guides/getting-started", "ja").await?;
//! println!("{:?}", module.filename);
//! ```

mod front_matter;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;
mod toc;

pub use fs::FsContentSource;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentSource;
pub use source::{BoxFuture, ContentError, ContentErrorKind, ContentModule, ContentSource};
pub use toc::{TocEntry, extract_toc, slugify};
