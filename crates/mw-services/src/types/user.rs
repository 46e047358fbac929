//! Wiki users.

use serde::Serialize;

/// A wiki account, addressed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct User {
    name: String,
}

impl User {
    /// Create a user reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// User name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for User {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
