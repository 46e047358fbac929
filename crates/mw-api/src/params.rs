//! Request parameters.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Separator for multi-value parameters (`prop=revisions|info`).
const LIST_SEPARATOR: &str = "|";

/// Parameters of a single action API request.
///
/// Keys are kept sorted so that requests are reproducible in logs and tests.
/// The `action` and `format` parameters are added by the client and must not
/// be set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key` to the display form of `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Set a boolean parameter.
    ///
    /// The action API treats any present boolean parameter as true, so a
    /// flag is only ever added, never sent as `false`.
    pub fn set_flag(&mut self, key: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), "1".to_owned());
        self
    }

    /// Set a multi-value parameter, joining the values with `|`.
    pub fn set_list<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);
        self.0.insert(key.into(), joined);
        self
    }

    /// Value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
