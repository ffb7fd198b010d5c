//! Template error types.

use std::path::PathBuf;

/// Error raised while loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Layout or content template is not part of the loaded set.
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template directory is missing or has no base layout.
    #[error("No base.html in template directory {}", dir.display())]
    MissingLayout {
        /// Configured template directory.
        dir: PathBuf,
    },

    /// Rendering failed (e.g., the payload does not fit the template).
    #[error("Failed to render {name}: {source}")]
    Render {
        /// Template being rendered.
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template source failed to parse.
    #[error("Invalid template {name}: {source}")]
    Syntax {
        /// Template name.
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        /// Template file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template directory produced an invalid glob pattern.
    #[error("Invalid template directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
