//! Configuration management for mw.
//!
//! Parses `mw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.endpoint`
//! - `api.user_agent`
//! - `rights.reason`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API endpoint.
    pub endpoint: Option<String>,
    /// Override `User-Agent` header.
    pub user_agent: Option<String>,
    /// Override redirect following for page queries.
    pub follow_redirects: Option<bool>,
    /// Override the rights change reason.
    pub reason: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mw.toml";

/// Upper bound for `api.timeout` in seconds.
const MAX_TIMEOUT: u64 = 600;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API connection configuration.
    pub api: ApiConfig,
    /// Page query defaults.
    pub query: QueryConfig,
    /// User rights defaults.
    pub rights: RightsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// API connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL of the wiki's `api.php`.
    pub endpoint: Option<String>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            user_agent: concat!("mw/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout: 30,
        }
    }
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Page query defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Follow redirects when fetching pages.
    pub follow_redirects: bool,
}

/// User rights defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RightsConfig {
    /// Reason recorded in the rights log. Empty sends no reason.
    pub reason: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.endpoint`").
        field: String,
        /// Error message (e.g., "${`WIKI_API`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(endpoint) = &settings.endpoint {
            self.api.endpoint = Some(endpoint.clone());
        }
        if let Some(user_agent) = &settings.user_agent {
            self.api.user_agent.clone_from(user_agent);
        }
        if let Some(follow_redirects) = settings.follow_redirects {
            self.query.follow_redirects = follow_redirects;
        }
        if let Some(reason) = &settings.reason {
            self.rights.reason.clone_from(reason);
        }
    }

    /// Get the validated API endpoint.
    ///
    /// Use this instead of reading `api.endpoint` directly when a command
    /// talks to the wiki.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no endpoint is configured.
    pub fn require_endpoint(&self) -> Result<&str, ConfigError> {
        let endpoint = self.api.endpoint.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "api.endpoint required (via --endpoint or [api] in mw.toml)".to_owned(),
            )
        })?;
        require_non_empty(endpoint, "api.endpoint")?;
        require_http_url(endpoint, "api.endpoint")?;
        Ok(endpoint)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and expansion
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.api.endpoint {
            require_non_empty(endpoint, "api.endpoint")?;
            require_http_url(endpoint, "api.endpoint")?;
        }

        require_non_empty(&self.api.user_agent, "api.user_agent")?;

        if self.api.timeout == 0 {
            return Err(ConfigError::Validation(
                "api.timeout must be greater than 0".to_owned(),
            ));
        }
        if self.api.timeout > MAX_TIMEOUT {
            return Err(ConfigError::Validation(format!(
                "api.timeout cannot exceed {MAX_TIMEOUT}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref endpoint) = self.api.endpoint {
            self.api.endpoint = Some(expand::expand_env(endpoint, "api.endpoint")?);
        }
        self.api.user_agent = expand::expand_env(&self.api.user_agent, "api.user_agent")?;
        self.rights.reason = expand::expand_env(&self.rights.reason, "rights.reason")?;
        Ok(())
    }
}
