//! Per-call options.

/// Options for page queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Resolve redirects and return the target page instead of the redirect.
    pub follow_redirects: bool,
}

impl QueryOptions {
    /// Options with redirect following enabled.
    #[must_use]
    pub fn following_redirects() -> Self {
        Self {
            follow_redirects: true,
        }
    }
}

/// Options for user rights changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRightsOptions {
    /// Reason recorded in the rights log. Empty means no reason is sent.
    pub reason: String,
}

impl UserRightsOptions {
    /// Options with the given log reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
