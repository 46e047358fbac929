//! Client trait.

use serde_json::Value;

use crate::error::ApiError;
use crate::params::Params;

/// Executes action API requests against a single wiki.
///
/// Reads must not change server state and may be sent as `GET`. Writes are
/// sent as `POST`; any token they need is part of `params`.
///
/// Implementations return the decoded response body. An API-level failure
/// (`{"error": {...}}` in the body) is reported as [`ApiError::Api`], never as
/// a successful value.
pub trait ApiClient: Send + Sync {
    /// Run a read-only `action` (`query`, `parse`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, an HTTP error status, an
    /// undecodable body or an error reported by the API.
    fn execute_read_request(&self, action: &str, params: Params) -> Result<Value, ApiError>;

    /// Run a state-changing `action` (`purge`, `userrights`, ...).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::execute_read_request`].
    fn execute_write_request(&self, action: &str, params: Params) -> Result<Value, ApiError>;
}
