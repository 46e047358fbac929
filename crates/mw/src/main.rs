//! mw CLI - wiki pages and user rights from the command line.
//!
//! Provides commands for:
//! - `page get`: Fetch a page with its latest revision
//! - `page purge`: Purge the server-side cache of pages
//! - `user rights`: Add or remove user groups

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PageCommand, UserCommand};
use output::Output;

/// mw - MediaWiki action API client.
#[derive(Parser)]
#[command(name = "mw", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page commands.
    #[command(subcommand)]
    Page(PageCommand),
    /// User commands.
    #[command(subcommand)]
    User(UserCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Page(cmd) => cmd.execute(),
        Commands::User(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
