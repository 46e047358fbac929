//! Services over an [`ApiClient`](mw_api::ApiClient).
//!
//! Each service borrows the client and issues one request per call, except
//! [`UserRightsChanger::change`] which needs a token first.

mod page_getter;
mod page_purger;
mod user_rights_changer;

pub use page_getter::PageGetter;
pub use page_purger::PagePurger;
pub use user_rights_changer::UserRightsChanger;
