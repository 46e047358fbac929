//! Page cache purging.

use mw_api::{ApiClient, Params};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::types::{Page, PageIdentifier, PageLookup, Title};

/// `action=purge` response.
#[derive(Debug, Deserialize)]
struct PurgeResponse {
    #[serde(default)]
    purge: Vec<PurgeEntry>,
}

/// One entry of the `purge` array.
#[derive(Debug, Deserialize)]
struct PurgeEntry {
    #[serde(default)]
    ns: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    pageid: Option<u64>,
    #[serde(default)]
    purged: Option<Value>,
}

impl PurgeEntry {
    fn is_purged(&self) -> bool {
        !matches!(self.purged, None | Some(Value::Bool(false)))
    }

    fn into_identifier(self) -> PageIdentifier {
        let title = self
            .title
            .map(|text| Title::new(text, self.ns.unwrap_or_default()));
        PageIdentifier::new(title, self.pageid)
    }
}

/// Purges the server-side cache of pages.
pub struct PagePurger<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> PagePurger<'a, C> {
    /// Create a purger using `client`.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Purge one page, addressed by page id (or by title if it has no id).
    ///
    /// Succeeds once the request completes; the response is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] without issuing a request
    /// when the page has neither a page id nor a title. Client errors are
    /// returned unchanged.
    pub fn purge(&self, page: &Page) -> Result<(), ServiceError> {
        let mut params = Params::new();
        match page.identifier().lookup() {
            Some(PageLookup::Id(id)) => {
                info!("Purging page {}", id);
                params.set("pageids", id);
            }
            Some(PageLookup::Title(title)) => {
                info!("Purging page '{}'", title);
                params.set("titles", title.text());
            }
            None => {
                return Err(ServiceError::InvalidArgument(
                    "cannot purge a page without page id or title".to_owned(),
                ));
            }
        }

        self.client.execute_write_request("purge", params)?;
        Ok(())
    }

    /// Purge several pages in one request, addressed by page id.
    ///
    /// Returns the identifiers of the pages the server reports as purged.
    /// An empty slice issues no request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] without issuing a request
    /// when a page has no page id (or is the missing-page sentinel).
    pub fn purge_pages(&self, pages: &[Page]) -> Result<Vec<PageIdentifier>, ServiceError> {
        if pages.is_empty() {
            return Ok(Vec::new());
        }

        let ids = pages
            .iter()
            .map(|page| match page.identifier().lookup() {
                Some(PageLookup::Id(id)) => Ok(id.to_string()),
                _ => Err(ServiceError::InvalidArgument(format!(
                    "cannot purge page {:?} without page id",
                    page.identifier()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Purging {} pages", ids.len());
        let mut params = Params::new();
        params.set_list("pageids", &ids);

        let response = self.client.execute_write_request("purge", params)?;
        let response: PurgeResponse = serde_json::from_value(response)?;

        let purged: Vec<PageIdentifier> = response
            .purge
            .into_iter()
            .filter(PurgeEntry::is_purged)
            .map(PurgeEntry::into_identifier)
            .collect();
        debug!("Server purged {} of {} pages", purged.len(), ids.len());
        Ok(purged)
    }
}
