//! Error types for the action API client.

/// Error from executing an action API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The API answered with an `error` object.
    #[error("API error: {code} - {info}")]
    Api {
        /// Machine-readable error code (e.g. `badtoken`).
        code: String,
        /// Human-readable description.
        info: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Error code reported by the API, if this is an API-level error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
