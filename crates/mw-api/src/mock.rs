//! Mock client implementation for testing.
//!
//! Provides [`MockApiClient`] for unit testing services without a wiki.

use std::collections::VecDeque;
use std::sync::RwLock;

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::params::Params;

/// Whether a request went through the read or the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// [`ApiClient::execute_read_request`].
    Read,
    /// [`ApiClient::execute_write_request`].
    Write,
}

/// A request received by [`MockApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Read or write path.
    pub kind: RequestKind,
    /// The `action` parameter.
    pub action: String,
    /// All other parameters.
    pub params: Params,
}

/// Mock client for testing.
///
/// Answers requests in order from a queue of canned responses and records
/// every request it receives. Use the builder methods to queue responses.
///
/// # Example
///
/// ```ignore
/// use mw_api::{ApiClient, MockApiClient, Params};
/// use serde_json::json;
///
/// let client = MockApiClient::new().with_response(json!({"purge": []}));
/// client.execute_write_request("purge", Params::new().with("pageids", 1)).unwrap();
/// assert_eq!(client.requests().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockApiClient {
    responses: RwLock<VecDeque<Result<Value, ApiError>>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockApiClient {
    /// Create a mock with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, response: Value) -> Self {
        self.responses.write().unwrap().push_back(Ok(response));
        self
    }

    /// Queue an API-level error (`{"error": {"code": ..., "info": ...}}`).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_api_error(self, code: &str, info: &str) -> Self {
        self.responses.write().unwrap().push_back(Err(ApiError::Api {
            code: code.to_owned(),
            info: info.to_owned(),
        }));
        self
    }

    /// Queue an HTTP error response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_http_error(self, status: u16, body: &str) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(Err(ApiError::HttpResponse {
                status,
                body: body.to_owned(),
            }));
        self
    }

    /// All requests received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Number of queued responses not yet consumed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remaining(&self) -> usize {
        self.responses.read().unwrap().len()
    }

    fn respond(&self, kind: RequestKind, action: &str, params: Params) -> Result<Value, ApiError> {
        self.requests.write().unwrap().push(RecordedRequest {
            kind,
            action: action.to_owned(),
            params,
        });

        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Api {
                    code: "mock-exhausted".to_owned(),
                    info: format!("no response queued for action={action}"),
                })
            })
    }
}

impl ApiClient for MockApiClient {
    fn execute_read_request(&self, action: &str, params: Params) -> Result<Value, ApiError> {
        self.respond(RequestKind::Read, action, params)
    }

    fn execute_write_request(&self, action: &str, params: Params) -> Result<Value, ApiError> {
        self.respond(RequestKind::Write, action, params)
    }
}
