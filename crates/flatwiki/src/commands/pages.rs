//! `flatwiki pages` command implementation.

use std::path::PathBuf;

use clap::Args;
use flatwiki_config::{CliSettings, Config};
use flatwiki_storage::{FsPageStore, PageStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Path to configuration file (default: auto-discover flatwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding page files (overrides config and STORAGE_PATH).
    #[arg(short, long)]
    storage_root: Option<PathBuf>,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the storage root cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            storage_root: self.storage_root,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let store = FsPageStore::new(config.storage_resolved.root);
        for title in store.list()? {
            output.data(title.as_str());
        }

        Ok(())
    }
}
