//! CLI command implementations.

pub(crate) mod page;
pub(crate) mod user;

pub(crate) use page::PageCommand;
pub(crate) use user::UserCommand;

use std::path::PathBuf;

use clap::Args;
use mw_api::HttpApiClient;
use mw_config::{CliSettings, Config};

use crate::error::CliError;

/// Connection arguments shared by every command that talks to the wiki.
#[derive(Args)]
pub(crate) struct ApiArgs {
    /// Wiki API endpoint, e.g. https://wiki.example.org/w/api.php (overrides config).
    #[arg(short, long, env = "MW_ENDPOINT")]
    endpoint: Option<String>,

    /// User-Agent header (overrides config).
    #[arg(long)]
    user_agent: Option<String>,

    /// Path to configuration file (default: auto-discover mw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ApiArgs {
    /// Load configuration, layering these arguments and `settings` on top.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Create the HTTP client described by `config`.
pub(crate) fn create_client(config: &Config) -> Result<HttpApiClient, CliError> {
    let endpoint = config.require_endpoint()?;
    Ok(HttpApiClient::with_settings(
        endpoint,
        &config.api.user_agent,
        config.api.timeout(),
    ))
}
