//! flatwiki CLI - minimal flat-file personal wiki.
//!
//! Provides commands for:
//! - `serve`: Start the wiki server
//! - `pages`: Print the titles of all stored pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PagesArgs, ServeArgs};
use output::Output;

/// flatwiki - minimal flat-file personal wiki.
#[derive(Parser)]
#[command(name = "flatwiki", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server.
    Serve(ServeArgs),
    /// List stored pages, one title per line.
    Pages(PagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Load .env before anything reads the environment (RUST_LOG, STORAGE_PATH)
    let dotenv_result = dotenvy::dotenv();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .init();

    // A missing or unreadable .env is not fatal: the process starts with
    // whatever the real environment provides.
    if let Err(err) = dotenv_result {
        tracing::warn!(error = %err, "Failed to load .env, continuing without it");
    }

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(err) => Err(err.into()),
        },
        Commands::Pages(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Pick the log filter: `--verbose` enables INFO, otherwise `RUST_LOG`, and
/// WARN when it is unset or does not parse.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
