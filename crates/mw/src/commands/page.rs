//! `mw page` command implementations.

use std::io::{self, Write};

use clap::{ArgGroup, Args, Subcommand};
use mw_config::CliSettings;
use mw_services::{Page, PageGetter, PageIdentifier, PagePurger, QueryOptions, Revisions, Title};
use tracing::info;

use super::{ApiArgs, create_client};
use crate::error::CliError;
use crate::output::Output;

/// Page commands.
#[derive(Subcommand)]
pub(crate) enum PageCommand {
    /// Fetch a page with its latest revision.
    Get(GetArgs),
    /// Purge the server-side cache of pages.
    Purge(PurgeArgs),
}

impl PageCommand {
    /// Execute the page command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Get(args) => args.execute(),
            Self::Purge(args) => args.execute(),
        }
    }
}

/// Arguments for the page get command.
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["title", "page_id", "revid"])))]
pub(crate) struct GetArgs {
    /// Page title; a namespace is given as a prefix (`Talk:Foo`).
    #[arg(short, long)]
    title: Option<String>,

    /// Page id.
    #[arg(short, long)]
    page_id: Option<u64>,

    /// Revision id; fetches the page containing it.
    #[arg(short, long)]
    revid: Option<u64>,

    /// Follow redirects to the target page (overrides config).
    #[arg(long)]
    follow_redirects: bool,

    /// Print the page as JSON to stdout.
    #[arg(long, conflicts_with = "content")]
    json: bool,

    /// Print the latest revision's content to stdout.
    #[arg(long)]
    content: bool,

    /// Fail when the page does not exist.
    #[arg(long)]
    require_existing: bool,

    #[command(flatten)]
    api: ApiArgs,
}

impl GetArgs {
    /// Execute the get command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the lookup fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            follow_redirects: self.follow_redirects.then_some(true),
            ..Default::default()
        };
        let config = self.api.load_config(settings)?;
        let client = create_client(&config)?;
        let getter = PageGetter::new(&client);
        let options = QueryOptions {
            follow_redirects: config.query.follow_redirects,
        };

        let page = match (self.revid, self.page_id, self.title) {
            (Some(revid), _, _) => {
                info!("Fetching page of revision {}", revid);
                getter.get_from_revision_id(revid, &options)?
            }
            (None, Some(page_id), _) => {
                info!("Fetching page id {}", page_id);
                getter.get_from_page_id(page_id, &options)?
            }
            (None, None, Some(title)) => {
                info!("Fetching page '{}'", title);
                getter.get_from_title(Title::from(title), &options)?
            }
            (None, None, None) => {
                return Err(CliError::Validation(
                    "one of --title, --page-id or --revid is required".to_owned(),
                ));
            }
        };

        let page = if self.require_existing {
            page.into_existing()?
        } else {
            page
        };

        if self.json {
            writeln!(io::stdout(), "{}", serde_json::to_string_pretty(&page)?)?;
            return Ok(());
        }

        output.page(&page);

        if self.content
            && let Some(latest) = page.revisions().latest()
        {
            write!(io::stdout(), "{}", latest.content().text())?;
            io::stdout().flush()?;
        }

        Ok(())
    }
}

/// Arguments for the page purge command.
#[derive(Args)]
pub(crate) struct PurgeArgs {
    /// Page ids to purge.
    #[arg(required = true)]
    page_ids: Vec<u64>,

    #[command(flatten)]
    api: ApiArgs,
}

impl PurgeArgs {
    /// Execute the purge command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the purge fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.api.load_config(CliSettings::default())?;
        let client = create_client(&config)?;
        let purger = PagePurger::new(&client);

        let pages: Vec<Page> = self
            .page_ids
            .iter()
            .map(|&id| Page::new(PageIdentifier::from_id(id), Revisions::new()))
            .collect();

        info!("Purging {} page(s)", pages.len());
        if let [page] = pages.as_slice() {
            purger.purge(page)?;
            output.purged(page.identifier());
            return Ok(());
        }

        let purged = purger.purge_pages(&pages)?;
        for identifier in &purged {
            output.purged(identifier);
        }
        output.not_purged(pages.len(), purged.len());

        Ok(())
    }
}
