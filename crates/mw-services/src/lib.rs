//! Typed services over the MediaWiki action API.
//!
//! This crate turns calls like "get a page by title" or "change user rights"
//! into action API requests and parses the JSON answers back into typed
//! objects:
//! - [`PageGetter`]: fetch a [`Page`] with its [`Revisions`] by revision id,
//!   page id, title or [`PageIdentifier`]
//! - [`PagePurger`]: purge the server-side cache of pages
//! - [`UserRightsChanger`]: add or remove user groups
//!
//! Every service borrows an [`ApiClient`](mw_api::ApiClient) and owns no
//! other state. Transport, authentication and retries are the client's job;
//! errors it raises come back unchanged as [`ServiceError::Api`].
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mw_api::HttpApiClient;
//! use mw_services::{PageGetter, QueryOptions};
//!
//! let client = HttpApiClient::new("https://wiki.example.org/w/api.php");
//! let getter = PageGetter::new(&client);
//!
//! let page = getter.get_from_title("Main Page", &QueryOptions::default())?;
//! if let Some(revision) = page.revisions().latest() {
//!     println!("{} bytes of {}", revision.content().text().len(), revision.content().model());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod response;
mod services;
mod types;

pub use error::ServiceError;
pub use options::{QueryOptions, UserRightsOptions};
pub use services::{PageGetter, PagePurger, UserRightsChanger};
pub use types::{
    Content, EditInfo, Page, PageIdentifier, PageLookup, Revision, Revisions, Title, User,
};
