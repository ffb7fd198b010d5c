//! `flatwiki serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use flatwiki_config::{CliSettings, Config};
use flatwiki_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover flatwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding page files (overrides config and STORAGE_PATH).
    #[arg(short, long)]
    storage_root: Option<PathBuf>,

    /// Directory with base.html and content templates (default: built-in).
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            storage_root: self.storage_root,
            templates_dir: self.templates_dir,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults"),
        }
        output.highlight(&format!(
            "Server starting on this address: http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Storage root: {}",
            config.storage_resolved.root.display()
        ));
        match &config.templates_resolved.dir {
            Some(dir) => output.info(&format!("Templates: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
