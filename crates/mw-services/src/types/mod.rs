//! Wiki domain types.

mod content;
mod identifier;
mod page;
mod revision;
mod title;
mod user;

pub use content::Content;
pub(crate) use content::DEFAULT_CONTENT_MODEL;
pub use identifier::{PageIdentifier, PageLookup};
pub use page::Page;
pub use revision::{EditInfo, Revision, Revisions};
pub use title::Title;
pub use user::User;
