//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use flatwiki_storage::PageStore;
use flatwiki_templates::Templates;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page repository.
    pub(crate) store: Arc<dyn PageStore>,
    /// Parsed templates, read-only after startup.
    pub(crate) templates: Templates,
}
