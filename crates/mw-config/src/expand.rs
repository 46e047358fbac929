//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${` is present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // Unset variables are left in place by the context so that
    // `${VAR:-default}` can still fall back; any `${VAR}` that survives
    // expansion is reported below.
    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());

    if let Some(var_name) = unexpanded_var(&expanded) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        });
    }

    Ok(expanded.into_owned())
}

/// Name of the first `${VAR}` reference left in `value`.
fn unexpanded_var(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let len = value[start..].find('}')?;
    Some(&value[start..start + len])
}
