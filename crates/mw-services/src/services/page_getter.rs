//! Page lookups.

use mw_api::{ApiClient, Params};
use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::options::QueryOptions;
use crate::response::page_from_query;
use crate::types::{Page, PageIdentifier, PageLookup, Revision, Title};

/// Page properties requested with every lookup.
const PAGE_PROPS: &str = "revisions|info|pageprops";

/// Revision properties requested with every lookup.
const REVISION_PROPS: &str = "ids|flags|timestamp|user|size|sha1|comment|content|tags";

/// Page info properties requested with every lookup.
const INFO_PROPS: &str = "protection";

/// Fetches pages with their latest revision.
///
/// Every lookup issues a single `action=query` read request. Lookups of
/// pages the wiki does not have succeed with the missing-page sentinel (see
/// [`Page::is_missing`]).
pub struct PageGetter<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> PageGetter<'a, C> {
    /// Create a getter using `client`.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Get the page that contains revision `id`.
    pub fn get_from_revision_id(
        &self,
        id: u64,
        options: &QueryOptions,
    ) -> Result<Page, ServiceError> {
        info!("Getting page for revision {}", id);
        let mut params = query_params(options);
        params.set("revids", id);
        self.fetch(params)
    }

    /// Get a page by title.
    ///
    /// A plain string is a title in the main namespace; pass a [`Title`] with
    /// the full prefixed text for other namespaces.
    pub fn get_from_title(
        &self,
        title: impl Into<Title>,
        options: &QueryOptions,
    ) -> Result<Page, ServiceError> {
        let title = title.into();
        info!("Getting page '{}'", title);
        let mut params = query_params(options);
        params.set("titles", title.text());
        self.fetch(params)
    }

    /// Get a page by page id.
    pub fn get_from_page_id(&self, id: u64, options: &QueryOptions) -> Result<Page, ServiceError> {
        info!("Getting page {}", id);
        let mut params = query_params(options);
        params.set("pageids", id);
        self.fetch(params)
    }

    /// Get a page by identifier, preferring its page id over its title.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] without issuing a request
    /// when the identifier has neither a page id nor a title.
    pub fn get_from_page_identifier(
        &self,
        identifier: &PageIdentifier,
        options: &QueryOptions,
    ) -> Result<Page, ServiceError> {
        match identifier.lookup() {
            Some(PageLookup::Id(id)) => self.get_from_page_id(id, options),
            Some(PageLookup::Title(title)) => self.get_from_title(title, options),
            None => Err(ServiceError::InvalidArgument(
                "page identifier has neither a page id nor a title".to_owned(),
            )),
        }
    }

    /// Re-fetch `page` and return a new page holding the fetched revisions
    /// followed by the revisions `page` already had.
    ///
    /// The result keeps the identifier of `page`; `page` itself is untouched.
    pub fn get_from_page(&self, page: &Page, options: &QueryOptions) -> Result<Page, ServiceError> {
        let fetched = self.get_from_page_identifier(page.identifier(), options)?;
        if fetched.is_missing() {
            warn!("Page {:?} no longer exists", page.identifier());
        }

        let (_, mut revisions) = fetched.into_parts();
        let fetched_count = revisions.len();
        revisions.add_revisions(page.revisions().iter().cloned());
        debug!(
            "Merged {} fetched and {} known revisions into {}",
            fetched_count,
            page.revisions().len(),
            revisions.len()
        );

        Ok(Page::new(page.identifier().clone(), revisions))
    }

    /// Fetch the page of `revision` and merge `revision` into its revisions.
    ///
    /// The identifier of the result is rebuilt from the response.
    pub fn get_from_revision(
        &self,
        revision: &Revision,
        options: &QueryOptions,
    ) -> Result<Page, ServiceError> {
        let fetched = self.get_from_revision_id(revision.id(), options)?;
        if fetched.is_missing() {
            return Ok(fetched);
        }

        let (identifier, mut revisions) = fetched.into_parts();
        revisions.add_revision(revision.clone());

        Ok(Page::new(identifier, revisions))
    }

    fn fetch(&self, params: Params) -> Result<Page, ServiceError> {
        let response = self.client.execute_read_request("query", params)?;
        let page = page_from_query(response)?;
        if page.is_missing() {
            warn!("Page {:?} does not exist", page.title());
        }
        Ok(page)
    }
}

/// Parameters shared by every page lookup.
fn query_params(options: &QueryOptions) -> Params {
    let mut params = Params::new()
        .with("prop", PAGE_PROPS)
        .with("rvprop", REVISION_PROPS)
        .with("inprop", INFO_PROPS);
    if options.follow_redirects {
        params.set_flag("redirects");
    }
    params
}

#[cfg(test)]
mod tests {
    use mw_api::{ApiError, MockApiClient, RecordedRequest, RequestKind};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::types::{Content, EditInfo, Revisions};

    fn page_fixture() -> Value {
        json!({
            "batchcomplete": "",
            "query": {"pages": {"42": {
                "pageid": 42,
                "ns": 0,
                "title": "Rust",
                "contentmodel": "wikitext",
                "revisions": [
                    {
                        "revid": 1002, "parentid": 1001, "minor": "",
                        "user": "Alice", "timestamp": "2024-05-02T12:00:00Z",
                        "comment": "copyedit", "*": "'''Rust''' is a language."
                    },
                    {
                        "revid": 1001, "parentid": 0,
                        "user": "Bob", "timestamp": "2024-05-01T09:30:00Z",
                        "comment": "create", "*": "Rust"
                    }
                ]
            }}}
        })
    }

    fn rust_identifier() -> PageIdentifier {
        PageIdentifier::new(Some(Title::from("Rust")), Some(42))
    }

    fn revision(id: u64, identifier: PageIdentifier) -> Revision {
        Revision::new(
            Content::wikitext(format!("rev {id}")),
            identifier,
            id,
            EditInfo::new("", false, false),
            "Carol",
            "2024-04-01T00:00:00Z",
        )
    }

    fn expected_query(extra: &[(&str, &str)]) -> Params {
        let mut params = Params::new()
            .with("prop", "revisions|info|pageprops")
            .with("rvprop", "ids|flags|timestamp|user|size|sha1|comment|content|tags")
            .with("inprop", "protection");
        for (key, value) in extra {
            params.set(*key, value);
        }
        params
    }

    fn ids(page: &Page) -> Vec<u64> {
        page.revisions().iter().map(Revision::id).collect()
    }

    #[test]
    fn test_get_from_page_id_builds_page_from_fixture() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);

        let page = getter
            .get_from_page_id(42, &QueryOptions::default())
            .unwrap();

        assert_eq!(page.identifier(), &rust_identifier());
        let expected: Revisions = [
            Revision::new(
                Content::new("'''Rust''' is a language.", "wikitext"),
                rust_identifier(),
                1002,
                EditInfo::new("copyedit", true, false),
                "Alice",
                "2024-05-02T12:00:00Z",
            ),
            Revision::new(
                Content::new("Rust", "wikitext"),
                rust_identifier(),
                1001,
                EditInfo::new("create", false, false),
                "Bob",
                "2024-05-01T09:30:00Z",
            ),
        ]
        .into_iter()
        .collect();
        assert_eq!(page.revisions(), &expected);

        assert_eq!(
            client.requests(),
            vec![RecordedRequest {
                kind: RequestKind::Read,
                action: "query".to_owned(),
                params: expected_query(&[("pageids", "42")]),
            }]
        );
    }

    #[test]
    fn test_get_from_title_sends_titles() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);

        let page = getter
            .get_from_title("Rust", &QueryOptions::default())
            .unwrap();

        assert_eq!(page.identifier(), &rust_identifier());
        assert_eq!(
            client.requests()[0].params,
            expected_query(&[("titles", "Rust")])
        );
    }

    #[test]
    fn test_get_from_title_uses_full_title_text() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);

        getter
            .get_from_title(Title::new("Talk:Rust", 1), &QueryOptions::default())
            .unwrap();

        assert_eq!(client.requests()[0].params.get("titles"), Some("Talk:Rust"));
    }

    #[test]
    fn test_get_from_revision_id_sends_revids() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);

        let page = getter
            .get_from_revision_id(1002, &QueryOptions::default())
            .unwrap();

        assert_eq!(page.identifier(), &rust_identifier());
        assert_eq!(ids(&page), vec![1002, 1001]);
        assert_eq!(
            client.requests()[0].params,
            expected_query(&[("revids", "1002")])
        );
    }

    #[test]
    fn test_follow_redirects_adds_redirects_flag() {
        let client = MockApiClient::new()
            .with_response(page_fixture())
            .with_response(page_fixture());
        let getter = PageGetter::new(&client);

        getter
            .get_from_title("Rust", &QueryOptions::following_redirects())
            .unwrap();
        getter
            .get_from_title("Rust", &QueryOptions::default())
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].params.get("redirects"), Some("1"));
        assert!(!requests[1].params.contains("redirects"));
    }

    #[test]
    fn test_missing_page_is_sentinel() {
        let client = MockApiClient::new().with_response(json!({
            "query": {"pages": {"-1": {"ns": 0, "title": "No such page", "missing": ""}}}
        }));
        let getter = PageGetter::new(&client);

        let page = getter
            .get_from_title("No such page", &QueryOptions::default())
            .unwrap();

        assert_eq!(page.id(), Some(0));
        assert!(page.revisions().is_empty());
        assert!(page.is_missing());
        assert!(matches!(
            page.into_existing(),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_from_page_identifier_without_id_or_title_fails_without_request() {
        let client = MockApiClient::new();
        let getter = PageGetter::new(&client);

        let err = getter
            .get_from_page_identifier(&PageIdentifier::default(), &QueryOptions::default())
            .unwrap_err();

        assert!(
            matches!(err, ServiceError::InvalidArgument(_)),
            "Expected ServiceError::InvalidArgument, got {err:?}"
        );
        assert!(client.requests().is_empty());
    }

    #[test]
    fn test_get_from_page_identifier_dispatches_on_id_then_title() {
        let client = MockApiClient::new()
            .with_response(page_fixture())
            .with_response(page_fixture());
        let getter = PageGetter::new(&client);

        getter
            .get_from_page_identifier(&rust_identifier(), &QueryOptions::default())
            .unwrap();
        getter
            .get_from_page_identifier(&PageIdentifier::from_title("Rust"), &QueryOptions::default())
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].params.get("pageids"), Some("42"));
        assert!(!requests[0].params.contains("titles"));
        assert_eq!(requests[1].params.get("titles"), Some("Rust"));
    }

    #[test]
    fn test_get_from_page_puts_fetched_revisions_first() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);
        let known: Revisions = [
            revision(900, rust_identifier()),
            revision(800, rust_identifier()),
            revision(700, rust_identifier()),
        ]
        .into_iter()
        .collect();
        let page = Page::new(rust_identifier(), known);
        let before = page.clone();

        let merged = getter
            .get_from_page(&page, &QueryOptions::default())
            .unwrap();

        assert_eq!(ids(&merged), vec![1002, 1001, 900, 800, 700]);
        assert_eq!(merged.identifier(), page.identifier());
        assert_eq!(page, before);
        assert_eq!(client.requests()[0].params.get("pageids"), Some("42"));
    }

    #[test]
    fn test_get_from_page_keeps_caller_identifier() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);
        let page = Page::new(PageIdentifier::from_id(42), Revisions::new());

        let merged = getter
            .get_from_page(&page, &QueryOptions::default())
            .unwrap();

        assert_eq!(merged.identifier(), &PageIdentifier::from_id(42));
        assert_eq!(ids(&merged), vec![1002, 1001]);
    }

    #[test]
    fn test_get_from_revision_merges_revision_and_rebuilds_identifier() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);
        let local = revision(1003, PageIdentifier::from_id(42));

        let page = getter
            .get_from_revision(&local, &QueryOptions::default())
            .unwrap();

        assert_eq!(page.identifier(), &rust_identifier());
        assert_eq!(ids(&page), vec![1002, 1001, 1003]);
        assert_eq!(client.requests()[0].params.get("revids"), Some("1003"));
    }

    #[test]
    fn test_get_from_revision_does_not_duplicate_fetched_revision() {
        let client = MockApiClient::new().with_response(page_fixture());
        let getter = PageGetter::new(&client);
        let local = revision(1002, PageIdentifier::from_id(42));

        let page = getter
            .get_from_revision(&local, &QueryOptions::default())
            .unwrap();

        assert_eq!(ids(&page), vec![1002, 1001]);
        assert_eq!(
            page.revisions().get(1002).map(Revision::user),
            Some("Alice")
        );
    }

    #[test]
    fn test_get_from_revision_unknown_revision_stays_missing() {
        let client = MockApiClient::new().with_response(json!({
            "batchcomplete": "",
            "query": {"badrevids": {"99999": {"revid": 99999, "missing": ""}}}
        }));
        let getter = PageGetter::new(&client);
        let local = revision(99999, PageIdentifier::from_id(42));

        let page = getter
            .get_from_revision(&local, &QueryOptions::default())
            .unwrap();

        assert!(page.is_missing());
        assert_eq!(page.id(), Some(0));
        assert!(page.revisions().is_empty());
    }

    #[test]
    fn test_client_error_is_propagated() {
        let client = MockApiClient::new().with_http_error(502, "Bad Gateway");
        let getter = PageGetter::new(&client);

        let err = getter
            .get_from_page_id(1, &QueryOptions::default())
            .unwrap_err();

        assert!(
            matches!(
                err,
                ServiceError::Api(ApiError::HttpResponse { status: 502, .. })
            ),
            "Expected propagated HTTP error, got {err:?}"
        );
    }

    #[test]
    fn test_getter_works_with_trait_object() {
        let client = MockApiClient::new().with_response(page_fixture());
        let dyn_client: &dyn ApiClient = &client;
        let getter = PageGetter::new(dyn_client);

        let page = getter
            .get_from_page_id(42, &QueryOptions::default())
            .unwrap();

        assert_eq!(page.id(), Some(42));
    }
}
