//! Markdown rich text as stored in the content store.

use serde::Serialize;

/// Markdown source text.
///
/// Serialises as `{ "source": "..." }`, the shape the page renderer expects.
/// Plain-text projections are [`plain_text`](crate::plain_text) and
/// [`excerpt`](crate::excerpt).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichText {
    source: String,
}

impl RichText {
    /// Wraps markdown source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the markdown source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl From<String> for RichText {
    fn from(source: String) -> Self {
        Self { source }
    }
}
