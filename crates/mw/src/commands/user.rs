//! `mw user` command implementations.

use clap::{Args, Subcommand};
use mw_config::CliSettings;
use mw_services::{User, UserRightsChanger, UserRightsOptions};
use tracing::info;

use super::{ApiArgs, create_client};
use crate::error::CliError;
use crate::output::Output;

/// User commands.
#[derive(Subcommand)]
pub(crate) enum UserCommand {
    /// Add or remove user groups.
    Rights(RightsArgs),
}

impl UserCommand {
    /// Execute the user command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Rights(args) => args.execute(),
        }
    }
}

/// Arguments for the user rights command.
#[derive(Args)]
pub(crate) struct RightsArgs {
    /// User name.
    user: String,

    /// Groups to add (repeat or comma-separate).
    #[arg(short, long, value_delimiter = ',')]
    add: Vec<String>,

    /// Groups to remove (repeat or comma-separate).
    #[arg(short, long, value_delimiter = ',')]
    remove: Vec<String>,

    /// Reason recorded in the rights log (overrides config).
    #[arg(long)]
    reason: Option<String>,

    #[command(flatten)]
    api: ApiArgs,
}

impl RightsArgs {
    /// Execute the rights command.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is to be changed, the configuration is
    /// invalid, or either API request fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.add.is_empty() && self.remove.is_empty() {
            return Err(CliError::Validation(
                "nothing to change: pass --add and/or --remove".to_owned(),
            ));
        }

        let settings = CliSettings {
            reason: self.reason.clone(),
            ..Default::default()
        };
        let config = self.api.load_config(settings)?;
        let client = create_client(&config)?;
        let changer = UserRightsChanger::new(&client);

        let add: Vec<&str> = self.add.iter().map(String::as_str).collect();
        let remove: Vec<&str> = self.remove.iter().map(String::as_str).collect();
        let options = UserRightsOptions::with_reason(config.rights.reason.clone());

        info!("Changing rights of {}", self.user);
        changer.change(&User::new(self.user.as_str()), &add, &remove, &options)?;

        output.rights_changed(&self.user, &add, &remove);

        Ok(())
    }
}
