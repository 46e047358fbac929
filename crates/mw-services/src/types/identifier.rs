//! Page identifiers.

use serde::Serialize;

use super::title::Title;

/// Identifies a page by title, by numeric page id, or both.
///
/// Pages built from API responses carry both. Caller-built identifiers
/// usually carry one of them. Page id 0 marks a page the wiki does not have,
/// so it never addresses a page on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PageIdentifier {
    title: Option<Title>,
    id: Option<u64>,
}

/// How a request addresses a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    /// By numeric page id (`pageids=`).
    Id(u64),
    /// By title (`titles=`).
    Title(Title),
}

impl PageIdentifier {
    /// Create an identifier from optional parts.
    pub fn new(title: Option<Title>, id: Option<u64>) -> Self {
        Self { title, id }
    }

    /// Identifier holding only a title.
    pub fn from_title(title: impl Into<Title>) -> Self {
        Self::new(Some(title.into()), None)
    }

    /// Identifier holding only a page id.
    pub fn from_id(id: u64) -> Self {
        Self::new(None, Some(id))
    }

    /// Page title, if known.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Page id, if known.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Whether this identifier can address a page.
    pub fn identifies_page(&self) -> bool {
        self.lookup().is_some()
    }

    /// The way to address this page in a request.
    ///
    /// A non-zero id wins over the title. Returns `None` when neither a
    /// non-zero id nor a non-empty title is present.
    pub fn lookup(&self) -> Option<PageLookup> {
        if let Some(id) = self.id.filter(|&id| id != 0) {
            return Some(PageLookup::Id(id));
        }
        self.title
            .as_ref()
            .filter(|title| !title.text().is_empty())
            .map(|title| PageLookup::Title(title.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identifier_does_not_identify_page() {
        let identifier = PageIdentifier::default();
        assert!(!identifier.identifies_page());
        assert_eq!(identifier.lookup(), None);
    }

    #[test]
    fn test_id_is_preferred_over_title() {
        let identifier = PageIdentifier::new(Some(Title::from("Foo")), Some(12));
        assert_eq!(identifier.lookup(), Some(PageLookup::Id(12)));
    }

    #[test]
    fn test_zero_id_falls_back_to_title() {
        let identifier = PageIdentifier::new(Some(Title::new("Talk:Foo", 1)), Some(0));
        assert_eq!(
            identifier.lookup(),
            Some(PageLookup::Title(Title::new("Talk:Foo", 1)))
        );
    }

    #[test]
    fn test_zero_id_alone_does_not_identify_page() {
        assert!(!PageIdentifier::from_id(0).identifies_page());
    }

    #[test]
    fn test_empty_title_does_not_identify_page() {
        assert!(!PageIdentifier::from_title("").identifies_page());
    }
}
