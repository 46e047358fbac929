//! Page titles.

use std::fmt;

use serde::Serialize;

/// Main (article) namespace.
const MAIN_NAMESPACE: i64 = 0;

/// Page title with its namespace.
///
/// `text` is the full title as the wiki displays it, including any namespace
/// prefix (`"User:Example"` in namespace 2).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Title {
    text: String,
    ns: i64,
}

impl Title {
    /// Create a title in the given namespace.
    pub fn new(text: impl Into<String>, ns: i64) -> Self {
        Self {
            text: text.into(),
            ns,
        }
    }

    /// Full title text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Namespace number.
    pub fn ns(&self) -> i64 {
        self.ns
    }
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self::new(text, MAIN_NAMESPACE)
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Self::new(text, MAIN_NAMESPACE)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
