//! Request-executing client for the MediaWiki action API.
//!
//! This crate provides the collaborator every service in `mw-services` talks
//! to. It knows nothing about pages or users, only how to run an `action`
//! with a set of parameters and hand back the decoded JSON:
//!
//! - [`ApiClient`] trait with `execute_read_request()` and `execute_write_request()`
//! - [`HttpApiClient`] implementation on top of a blocking `ureq` agent
//! - [`MockApiClient`] for testing (behind `mock` feature flag)
//!
//! Authentication, retries and throttling are out of scope: wrap or replace
//! [`HttpApiClient`] when a wiki needs them.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mw_api::{ApiClient, HttpApiClient, Params};
//!
//! let client = HttpApiClient::new("https://wiki.example.org/w/api.php");
//! let params = Params::new().with("meta", "siteinfo");
//! let result = client.execute_read_request("query", params)?;
//! println!("{}", result["query"]["general"]["sitename"]);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod params;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::HttpApiClient;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockApiClient, RecordedRequest, RequestKind};
pub use params::Params;
