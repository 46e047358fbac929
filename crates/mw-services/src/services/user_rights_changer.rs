//! User group changes.

use mw_api::{ApiClient, Params};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::options::UserRightsOptions;
use crate::types::User;

/// Token type requested before a rights change.
const TOKEN_TYPE: &str = "userrights";

/// Adds and removes user groups.
///
/// A change takes two round-trips: fetch a rights token for the user, then
/// submit `action=userrights` with it. The pair is not atomic; a token that
/// went stale in between fails at the API and is returned as an error.
pub struct UserRightsChanger<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> UserRightsChanger<'a, C> {
    /// Create a changer using `client`.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Add `user` to the `add` groups and remove them from the `remove` groups.
    ///
    /// Success means the API accepted the request; the resulting group
    /// membership is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MalformedResponse`] when the token response
    /// carries no token. Client errors from either request are returned
    /// unchanged and never retried.
    pub fn change(
        &self,
        user: &User,
        add: &[&str],
        remove: &[&str],
        options: &UserRightsOptions,
    ) -> Result<(), ServiceError> {
        let token = self.fetch_token(user)?;

        info!(
            "Changing rights of {} (add: {:?}, remove: {:?})",
            user.name(),
            add,
            remove
        );
        let mut params = Params::new().with("user", user.name()).with("token", token);
        if !options.reason.is_empty() {
            params.set("reason", &options.reason);
        }
        if !add.is_empty() {
            params.set_list("add", add);
        }
        if !remove.is_empty() {
            params.set_list("remove", remove);
        }

        self.client.execute_write_request("userrights", params)?;
        Ok(())
    }

    fn fetch_token(&self, user: &User) -> Result<String, ServiceError> {
        debug!("Fetching {} token for {}", TOKEN_TYPE, user.name());
        let params = Params::new()
            .with("list", "users")
            .with("ustoken", TOKEN_TYPE)
            .with("ususers", user.name());

        let response = self.client.execute_read_request("query", params)?;
        response
            .pointer("/query/users/0/userrightstoken")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                ServiceError::MalformedResponse(format!(
                    "no {TOKEN_TYPE} token for user '{}'",
                    user.name()
                ))
            })
    }
}
