//! Action API client over HTTP.
//!
//! Provides a sync HTTP client for a single wiki's `api.php` endpoint.
//! Requests are unauthenticated.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};
use ureq::Agent;
use ureq::http::Response;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::params::Params;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Default `User-Agent` header.
const DEFAULT_USER_AGENT: &str = concat!("mw/", env!("CARGO_PKG_VERSION"));

/// Action API client backed by a blocking `ureq` agent.
pub struct HttpApiClient {
    agent: Agent,
    endpoint: String,
    user_agent: String,
}

impl HttpApiClient {
    /// Create client with default timeout and user agent.
    pub fn new(endpoint: &str) -> Self {
        Self::with_settings(
            endpoint,
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_TIMEOUT),
        )
    }

    /// Create client with explicit settings.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the wiki's `api.php`
    /// * `user_agent` - Value of the `User-Agent` header (wikis may block generic agents)
    /// * `timeout` - Global timeout for a single request
    pub fn with_settings(endpoint: &str, user_agent: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.to_owned(),
            user_agent: user_agent.to_owned(),
        }
    }

    /// Get the API endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Decode a response body, mapping HTTP and API errors.
    fn read_response(response: Response<ureq::Body>) -> Result<Value, ApiError> {
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ApiError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        check_api_error(serde_json::from_str(&body)?)
    }
}

impl ApiClient for HttpApiClient {
    fn execute_read_request(&self, action: &str, params: Params) -> Result<Value, ApiError> {
        let pairs = request_pairs(action, &params);
        info!("GET {} action={}", self.endpoint, action);
        debug!(params = ?redacted(&params), "read request parameters");

        let response = self
            .agent
            .get(&self.endpoint)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .query_pairs(pairs)
            .call()?;

        Self::read_response(response)
    }

    fn execute_write_request(&self, action: &str, params: Params) -> Result<Value, ApiError> {
        let pairs = request_pairs(action, &params);
        info!("POST {} action={}", self.endpoint, action);
        debug!(params = ?redacted(&params), "write request parameters");

        let response = self
            .agent
            .post(&self.endpoint)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send_form(pairs)?;

        Self::read_response(response)
    }
}

/// Full parameter list for a request: caller parameters plus `action` and `format`.
fn request_pairs<'a>(action: &'a str, params: &'a Params) -> Vec<(&'a str, &'a str)> {
    let mut pairs = Vec::with_capacity(params.len() + 2);
    pairs.push(("action", action));
    pairs.push(("format", "json"));
    pairs.extend(
        params
            .iter()
            .filter(|(key, _)| *key != "action" && *key != "format"),
    );
    pairs
}

/// Copy of `params` safe to log: token values are masked.
fn redacted(params: &Params) -> Params {
    params
        .iter()
        .map(|(key, value)| {
            if key.ends_with("token") {
                (key, "[redacted]")
            } else {
                (key, value)
            }
        })
        .collect()
}

/// Turn an `{"error": {"code": ..., "info": ...}}` body into [`ApiError::Api`].
fn check_api_error(body: Value) -> Result<Value, ApiError> {
    let Some(error) = body.get("error") else {
        return Ok(body);
    };

    let field = |name: &str| {
        error
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };

    Err(ApiError::Api {
        code: field("code"),
        info: field("info"),
    })
}
