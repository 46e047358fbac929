//! Pages.

use serde::Serialize;

use super::identifier::PageIdentifier;
use super::revision::Revisions;
use super::title::Title;
use crate::error::ServiceError;

/// A wiki page and the revisions fetched for it.
///
/// A page never changes after construction. Services that learn more about
/// a page return a new `Page`.
///
/// Lookups of pages the wiki does not have return a *missing* page: page id
/// 0 and no revisions. Check [`Page::is_missing`] or use
/// [`Page::into_existing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    identifier: PageIdentifier,
    revisions: Revisions,
}

impl Page {
    /// Create a page.
    pub fn new(identifier: PageIdentifier, revisions: Revisions) -> Self {
        Self {
            identifier,
            revisions,
        }
    }

    /// Missing-page sentinel: page id 0, no revisions.
    pub(crate) fn missing(title: Option<Title>) -> Self {
        Self::new(PageIdentifier::new(title, Some(0)), Revisions::new())
    }

    /// Page identifier.
    pub fn identifier(&self) -> &PageIdentifier {
        &self.identifier
    }

    /// Page id, if known.
    pub fn id(&self) -> Option<u64> {
        self.identifier.id()
    }

    /// Page title, if known.
    pub fn title(&self) -> Option<&Title> {
        self.identifier.title()
    }

    /// Revisions in fetch order.
    pub fn revisions(&self) -> &Revisions {
        &self.revisions
    }

    /// Whether this is the missing-page sentinel.
    pub fn is_missing(&self) -> bool {
        self.identifier.id() == Some(0)
    }

    /// Turn the missing-page sentinel into [`ServiceError::NotFound`].
    pub fn into_existing(self) -> Result<Self, ServiceError> {
        if self.is_missing() {
            let name = self
                .title()
                .map_or_else(|| "(unknown title)".to_owned(), ToString::to_string);
            return Err(ServiceError::NotFound(name));
        }
        Ok(self)
    }

    /// Split into identifier and revisions.
    pub fn into_parts(self) -> (PageIdentifier, Revisions) {
        (self.identifier, self.revisions)
    }
}
