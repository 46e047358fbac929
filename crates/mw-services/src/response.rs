//! Action API response shapes.
//!
//! Only the fields the services read are declared; serde skips the rest.
//! Both `formatversion=1` (pages keyed by id, `*` text, empty-string flags)
//! and `formatversion=2` (page arrays, `content` text, boolean flags) parse.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::types::{
    Content, DEFAULT_CONTENT_MODEL, EditInfo, Page, PageIdentifier, Revision, Revisions, Title,
};

/// `action=query` response.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub query: Option<QueryBody>,
}

/// The `query` object.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryBody {
    #[serde(default)]
    pub pages: Option<PageEntries>,
}

/// Page entries: an object keyed by page id, or an array.
///
/// Keyed entries stay in server order (`serde_json` is built with
/// `preserve_order`), so "first" is the first page the server sent, not the
/// smallest id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PageEntries {
    List(Vec<PageEntry>),
    Keyed(Map<String, Value>),
}

impl PageEntries {
    /// First page entry in response order, if any.
    pub fn into_first(self) -> Result<Option<PageEntry>, serde_json::Error> {
        match self {
            Self::List(entries) => Ok(entries.into_iter().next()),
            Self::Keyed(entries) => entries
                .into_iter()
                .next()
                .map(|(_, entry)| serde_json::from_value(entry))
                .transpose(),
        }
    }
}

/// One entry of `query.pages`.
#[derive(Debug, Deserialize)]
pub(crate) struct PageEntry {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub ns: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub contentmodel: Option<String>,
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default)]
    pub invalid: Option<Value>,
    #[serde(default)]
    pub revisions: Vec<RevisionEntry>,
}

/// One entry of a page's `revisions` array.
#[derive(Debug, Deserialize)]
pub(crate) struct RevisionEntry {
    pub revid: u64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub minor: Option<Value>,
    #[serde(default)]
    pub bot: Option<Value>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub contentmodel: Option<String>,
    #[serde(rename = "*", alias = "content", default)]
    pub text: Option<String>,
    #[serde(default)]
    pub slots: Option<Slots>,
}

/// Multi-content revision slots (`rvslots=main`).
#[derive(Debug, Deserialize)]
pub(crate) struct Slots {
    #[serde(default)]
    pub main: Option<SlotEntry>,
}

/// A single slot.
#[derive(Debug, Deserialize)]
pub(crate) struct SlotEntry {
    #[serde(default)]
    pub contentmodel: Option<String>,
    #[serde(rename = "*", alias = "content", default)]
    pub text: Option<String>,
}

/// A presence flag: `""` under formatversion 1, a boolean under 2.
fn flag(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(_) => true,
    }
}

/// Parse a `query` response into the page it describes.
///
/// A response without page entries (e.g. only `badrevids`), or whose entry
/// has no `pageid` or is flagged `missing`/`invalid`, yields the
/// missing-page sentinel.
pub(crate) fn page_from_query(response: Value) -> Result<Page, ServiceError> {
    let response: QueryResponse = serde_json::from_value(response)?;
    let query = response
        .query
        .ok_or_else(|| ServiceError::MalformedResponse("missing 'query' object".to_owned()))?;

    let first = match query.pages {
        Some(pages) => pages.into_first()?,
        None => None,
    };
    match first {
        Some(entry) => Ok(entry.into_page()),
        None => Ok(Page::missing(None)),
    }
}

impl PageEntry {
    fn title(&self) -> Option<Title> {
        self.title
            .as_ref()
            .map(|text| Title::new(text.as_str(), self.ns.unwrap_or_default()))
    }

    /// Convert into a page; revisions are kept in response order.
    pub fn into_page(self) -> Page {
        let title = self.title();

        let pageid = match self.pageid {
            Some(id) if !flag(self.missing.as_ref()) && !flag(self.invalid.as_ref()) => id,
            _ => return Page::missing(title),
        };

        let identifier = PageIdentifier::new(title, Some(pageid));
        let page_model = self.contentmodel;
        let revisions: Revisions = self
            .revisions
            .into_iter()
            .map(|entry| entry.into_revision(&identifier, page_model.as_deref()))
            .collect();

        Page::new(identifier, revisions)
    }
}

impl RevisionEntry {
    fn into_revision(self, identifier: &PageIdentifier, page_model: Option<&str>) -> Revision {
        let (slot_text, slot_model) = self
            .slots
            .and_then(|slots| slots.main)
            .map_or((None, None), |slot| (slot.text, slot.contentmodel));

        let model = page_model
            .map(ToOwned::to_owned)
            .or(self.contentmodel)
            .or(slot_model)
            .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_owned());
        let text = self.text.or(slot_text).unwrap_or_default();

        let edit_info = EditInfo::new(
            self.comment.unwrap_or_default(),
            flag(self.minor.as_ref()),
            flag(self.bot.as_ref()),
        );

        Revision::new(
            Content::new(text, model),
            identifier.clone(),
            self.revid,
            edit_info,
            self.user.unwrap_or_default(),
            self.timestamp.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_formatversion_1_page() {
        let response = json!({
            "batchcomplete": "",
            "query": {"pages": {"15": {
                "pageid": 15, "ns": 4, "title": "Project:About",
                "contentmodel": "wikitext",
                "revisions": [{
                    "revid": 200, "parentid": 150, "minor": "",
                    "user": "Alice", "timestamp": "2024-03-01T10:00:00Z",
                    "comment": "tweak", "*": "About us"
                }]
            }}}
        });

        let page = page_from_query(response).unwrap();

        let identifier = PageIdentifier::new(Some(Title::new("Project:About", 4)), Some(15));
        assert_eq!(page.identifier(), &identifier);
        let expected = Revision::new(
            Content::new("About us", "wikitext"),
            identifier,
            200,
            EditInfo::new("tweak", true, false),
            "Alice",
            "2024-03-01T10:00:00Z",
        );
        assert_eq!(page.revisions().iter().collect::<Vec<_>>(), vec![&expected]);
    }

    #[test]
    fn test_formatversion_2_page() {
        let response = json!({
            "query": {"pages": [{
                "pageid": 3, "ns": 0, "title": "Lua",
                "contentmodel": "wikitext",
                "revisions": [{
                    "revid": 9, "minor": false, "bot": true,
                    "user": "Bot", "timestamp": "2024-03-02T00:00:00Z",
                    "comment": "", "content": "text"
                }]
            }]}
        });

        let page = page_from_query(response).unwrap();

        let revision = page.revisions().get(9).unwrap();
        assert_eq!(revision.content().text(), "text");
        assert!(!revision.edit_info().is_minor());
        assert!(revision.edit_info().is_bot());
    }

    #[test]
    fn test_entry_without_pageid_is_missing() {
        let response = json!({
            "query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}
        });

        let page = page_from_query(response).unwrap();

        assert!(page.is_missing());
        assert_eq!(page.id(), Some(0));
        assert_eq!(page.title(), Some(&Title::from("Nope")));
        assert!(page.revisions().is_empty());
    }

    #[test]
    fn test_missing_flag_with_pageid_is_missing() {
        let response = json!({
            "query": {"pages": {"999": {"pageid": 999, "missing": ""}}}
        });

        let page = page_from_query(response).unwrap();

        assert_eq!(page.id(), Some(0));
    }

    #[test]
    fn test_badrevids_only_is_missing() {
        let response = json!({
            "query": {"badrevids": {"123": {"revid": 123, "missing": ""}}}
        });

        let page = page_from_query(response).unwrap();

        assert!(page.is_missing());
        assert!(page.title().is_none());
    }

    #[test]
    fn test_content_model_falls_back_to_revision_then_slot() {
        let response = json!({
            "query": {"pages": [{
                "pageid": 1, "ns": 8, "title": "MediaWiki:Common.css",
                "revisions": [
                    {"revid": 2, "contentmodel": "css", "content": "a{}"},
                    {"revid": 1, "slots": {"main": {"contentmodel": "json", "content": "{}"}}},
                    {"revid": 0}
                ]
            }]}
        });

        let page = page_from_query(response).unwrap();
        let models: Vec<&str> = page.revisions().iter().map(|r| r.content().model()).collect();

        assert_eq!(models, vec!["css", "json", "wikitext"]);
        assert_eq!(page.revisions().get(1).unwrap().content().text(), "{}");
    }

    #[test]
    fn test_missing_query_is_malformed() {
        let err = page_from_query(json!({"batchcomplete": ""})).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn test_revision_without_revid_is_malformed() {
        let response = json!({
            "query": {"pages": [{"pageid": 1, "ns": 0, "title": "A", "revisions": [{"user": "x"}]}]}
        });

        let err = page_from_query(response).unwrap_err();

        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn test_keyed_pages_take_first_entry_in_server_order() {
        let response: Value = serde_json::from_str(
            r#"{"query": {"pages": {
                "200": {"pageid": 200, "ns": 0, "title": "Later"},
                "15": {"pageid": 15, "ns": 0, "title": "Earlier"}
            }}}"#,
        )
        .unwrap();

        let page = page_from_query(response).unwrap();

        assert_eq!(page.id(), Some(200));
        assert_eq!(page.title().map(Title::text), Some("Later"));
    }
}
