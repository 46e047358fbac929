//! Revision content.

use serde::Serialize;

/// Content model used when the API does not report one.
pub(crate) const DEFAULT_CONTENT_MODEL: &str = "wikitext";

/// Raw content of a revision together with its content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    text: String,
    model: String,
}

impl Content {
    /// Create content with an explicit model (`wikitext`, `json`, `css`, ...).
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    /// Wikitext content.
    pub fn wikitext(text: impl Into<String>) -> Self {
        Self::new(text, DEFAULT_CONTENT_MODEL)
    }

    /// Raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Content model tag.
    pub fn model(&self) -> &str {
        &self.model
    }
}
