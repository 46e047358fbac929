//! Terminal rendering of pages, purge results and rights changes.

use std::fmt::Display;

use console::{Style, Term};
use mw_services::{Page, PageIdentifier, Revision};

/// Writes command results to stderr so that stdout carries only page data.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    done: Style,
    caution: Style,
    failure: Style,
    meta: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            done: Style::new().green(),
            caution: Style::new().yellow(),
            failure: Style::new().red(),
            meta: Style::new().dim(),
        }
    }

    /// Page heading followed by one entry per revision, or a notice when the
    /// page does not exist.
    pub(crate) fn page(&self, page: &Page) {
        let name = describe_identifier(page.identifier());
        if page.is_missing() {
            self.styled(&self.caution, &format!("Page {name} does not exist"));
            return;
        }

        self.styled(&self.heading, &name);
        for revision in page.revisions() {
            self.plain(&revision_line(revision));
            self.styled(&self.meta, &revision_detail(revision));
        }
    }

    pub(crate) fn purged(&self, identifier: &PageIdentifier) {
        self.styled(
            &self.done,
            &format!("Purged {}", describe_identifier(identifier)),
        );
    }

    /// Notice for pages the server did not report as purged.
    pub(crate) fn not_purged(&self, requested: usize, purged: usize) {
        if purged < requested {
            self.styled(
                &self.caution,
                &format!("{} of {requested} pages were not purged", requested - purged),
            );
        }
    }

    pub(crate) fn rights_changed(&self, user: &str, add: &[&str], remove: &[&str]) {
        self.styled(&self.done, &format!("Rights change for {user} accepted"));
        if !add.is_empty() {
            self.plain(&format!("  added:   {}", add.join(", ")));
        }
        if !remove.is_empty() {
            self.plain(&format!("  removed: {}", remove.join(", ")));
        }
    }

    pub(crate) fn error(&self, err: &dyn Display) {
        self.styled(&self.failure, &format!("Error: {err}"));
    }

    fn plain(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    fn styled(&self, style: &Style, line: &str) {
        let _ = self.term.write_line(&style.apply_to(line).to_string());
    }
}

/// Human-readable page name: title and id when known.
fn describe_identifier(identifier: &PageIdentifier) -> String {
    match (identifier.title(), identifier.id()) {
        (Some(title), Some(id)) => format!("'{title}' (id {id})"),
        (Some(title), None) => format!("'{title}'"),
        (None, Some(id)) => format!("id {id}"),
        (None, None) => "(unidentified page)".to_owned(),
    }
}

/// One-line revision summary: id, timestamp, user, flags and edit summary.
fn revision_line(revision: &Revision) -> String {
    let info = revision.edit_info();
    let flags: String = [(info.is_minor(), 'm'), (info.is_bot(), 'b')]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .collect();

    let mut line = format!(
        "r{} {} {}",
        revision.id(),
        revision.timestamp(),
        revision.user()
    );
    if !flags.is_empty() {
        line.push_str(&format!(" [{flags}]"));
    }
    if !info.summary().is_empty() {
        line.push_str(&format!(" ({})", info.summary()));
    }
    line
}

fn revision_detail(revision: &Revision) -> String {
    format!(
        "  {} bytes, {}",
        revision.content().text().len(),
        revision.content().model()
    )
}

#[cfg(test)]
mod tests {
    use mw_services::{Content, EditInfo, Title};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_describe_identifier() {
        assert_eq!(
            describe_identifier(&PageIdentifier::new(Some(Title::from("Rust")), Some(42))),
            "'Rust' (id 42)"
        );
        assert_eq!(
            describe_identifier(&PageIdentifier::from_title("Talk:Rust")),
            "'Talk:Rust'"
        );
        assert_eq!(describe_identifier(&PageIdentifier::from_id(7)), "id 7");
        assert_eq!(
            describe_identifier(&PageIdentifier::default()),
            "(unidentified page)"
        );
    }

    #[test]
    fn test_revision_line_with_flags_and_summary() {
        let revision = Revision::new(
            Content::wikitext("text"),
            PageIdentifier::from_id(1),
            1002,
            EditInfo::new("copyedit", true, true),
            "Alice",
            "2024-05-02T12:00:00Z",
        );

        assert_eq!(
            revision_line(&revision),
            "r1002 2024-05-02T12:00:00Z Alice [mb] (copyedit)"
        );
    }

    #[test]
    fn test_revision_line_plain() {
        let revision = Revision::new(
            Content::wikitext("text"),
            PageIdentifier::from_id(1),
            5,
            EditInfo::default(),
            "Bob",
            "2024-01-01T00:00:00Z",
        );

        assert_eq!(revision_line(&revision), "r5 2024-01-01T00:00:00Z Bob");
    }

    #[test]
    fn test_revision_detail_reports_size_and_model() {
        let revision = Revision::new(
            Content::new("{}", "json"),
            PageIdentifier::from_id(1),
            3,
            EditInfo::default(),
            "Bob",
            "2024-01-01T00:00:00Z",
        );

        assert_eq!(revision_detail(&revision), "  2 bytes, json");
    }
}
