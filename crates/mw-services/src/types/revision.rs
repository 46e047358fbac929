//! Revisions and revision lists.

use serde::Serialize;

use super::content::Content;
use super::identifier::PageIdentifier;

/// Edit metadata of a revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditInfo {
    summary: String,
    minor: bool,
    bot: bool,
}

impl EditInfo {
    /// Create edit metadata.
    pub fn new(summary: impl Into<String>, minor: bool, bot: bool) -> Self {
        Self {
            summary: summary.into(),
            minor,
            bot,
        }
    }

    /// Edit summary (the revision comment).
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Whether the edit was flagged minor.
    pub fn is_minor(&self) -> bool {
        self.minor
    }

    /// Whether the edit was flagged as a bot edit.
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}

/// Immutable snapshot of a page at one point in its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    content: Content,
    page_identifier: PageIdentifier,
    id: u64,
    edit_info: EditInfo,
    user: String,
    timestamp: String,
}

impl Revision {
    /// Create a revision.
    ///
    /// # Arguments
    /// * `content` - Revision text and content model
    /// * `page_identifier` - Page the revision belongs to
    /// * `id` - Revision id
    /// * `edit_info` - Summary and minor/bot flags
    /// * `user` - Author name
    /// * `timestamp` - ISO 8601 timestamp as reported by the wiki
    pub fn new(
        content: Content,
        page_identifier: PageIdentifier,
        id: u64,
        edit_info: EditInfo,
        user: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            content,
            page_identifier,
            id,
            edit_info,
            user: user.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Revision content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Page this revision belongs to.
    pub fn page_identifier(&self) -> &PageIdentifier {
        &self.page_identifier
    }

    /// Revision id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Edit metadata.
    pub fn edit_info(&self) -> &EditInfo {
        &self.edit_info
    }

    /// Author name. Empty when the wiki hides it.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Save timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Ordered list of revisions, unique by revision id.
///
/// Order is insertion order. Lists built from API responses are newest
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Revisions(Vec<Revision>);

impl Revisions {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a revision unless one with the same id is already present.
    ///
    /// Returns whether the revision was added.
    pub fn add_revision(&mut self, revision: Revision) -> bool {
        if self.has_revision_with_id(revision.id()) {
            return false;
        }
        self.0.push(revision);
        true
    }

    /// Append every revision whose id is not yet present, keeping order.
    pub fn add_revisions(&mut self, revisions: impl IntoIterator<Item = Revision>) {
        for revision in revisions {
            self.add_revision(revision);
        }
    }

    /// Revision with the given id.
    pub fn get(&self, id: u64) -> Option<&Revision> {
        self.0.iter().find(|revision| revision.id() == id)
    }

    /// Whether a revision with the given id is present.
    pub fn has_revision_with_id(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Revision with the highest id.
    pub fn latest(&self) -> Option<&Revision> {
        self.0.iter().max_by_key(|revision| revision.id())
    }

    /// Number of revisions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, Revision> {
        self.0.iter()
    }
}

impl FromIterator<Revision> for Revisions {
    fn from_iter<T: IntoIterator<Item = Revision>>(iter: T) -> Self {
        let mut revisions = Self::new();
        revisions.add_revisions(iter);
        revisions
    }
}

impl IntoIterator for Revisions {
    type Item = Revision;
    type IntoIter = std::vec::IntoIter<Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Revisions {
    type Item = &'a Revision;
    type IntoIter = std::slice::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
