//! Error types for the wiki services.

use mw_api::ApiError;

/// Error from a page or user-rights operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller passed something that cannot be turned into a request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The API reported no matching page.
    ///
    /// Page lookups return a missing-page sentinel instead; this variant is
    /// produced by [`Page::into_existing`](crate::Page::into_existing).
    #[error("page not found: {0}")]
    NotFound(String),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Error raised by the API client, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::MalformedResponse(e.to_string())
    }
}
