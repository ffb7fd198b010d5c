//! HTTP server for flatwiki.
//!
//! Serves a small personal wiki over five routes, rendering every response
//! through the layout/content templates and persisting pages as flat files.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use flatwiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         storage_root: PathBuf::from("data"),
//!         templates_dir: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (route grammar, PageId extraction)
//!                        │
//!                        ├─► handlers ──► PageStore (flatwiki-storage)
//!                        │       │
//!                        │       └─► Templates: content pass, then layout pass
//!                        │
//!                        └─► fallback: 404
//! ```

mod app;
mod error;
mod form;
mod handlers;
mod middleware;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use flatwiki_storage::{FsPageStore, PageStore};
use flatwiki_templates::Templates;
use state::AppState;

pub use routes::Route;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the page files.
    pub storage_root: PathBuf,
    /// Template directory (`None` uses the built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage_root: PathBuf::from("data"),
            templates_dir: None,
        }
    }
}

/// Build the application router over a page store and a template set.
///
/// The templates are parsed before this call and never change afterwards;
/// the router only reads them.
pub fn router(store: Arc<dyn PageStore>, templates: Templates) -> Router {
    app::create_router(Arc::new(AppState { store, templates }))
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the templates fail to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn PageStore> = Arc::new(FsPageStore::new(config.storage_root.clone()));

    // Templates are loaded once, before the first request
    let templates = match &config.templates_dir {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::embedded(),
    };

    let app = router(store, templates);

    // Bind and run server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        storage_root = %config.storage_root.display(),
        "Starting server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from flatwiki config.
#[must_use]
pub fn server_config_from_config(config: &flatwiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        storage_root: config.storage_resolved.root.clone(),
        templates_dir: config.templates_resolved.dir.clone(),
    }
}
