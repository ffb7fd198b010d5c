//! Repository trait and error types.
//!
//! Provides the core [`PageStore`] trait for abstracting page persistence,
//! along with [`StorageError`] for unified error handling across backends.

use std::path::PathBuf;

use crate::page::{Page, PageId};

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Page (or storage root) does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether this error means the page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Page repository.
///
/// Every operation is keyed by a validated [`PageId`]. Implementations read
/// through to their backing store on every call; nothing is cached.
pub trait PageStore: Send + Sync {
    /// Load a page.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the page does not exist, or
    /// another kind for I/O failures.
    fn load(&self, title: &PageId) -> Result<Page, StorageError>;

    /// Create or replace a page with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page cannot be written.
    fn save(&self, title: &PageId, body: &[u8]) -> Result<(), StorageError>;

    /// Delete a page.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the page does not exist, or
    /// another kind for I/O failures.
    fn delete(&self, title: &PageId) -> Result<(), StorageError>;

    /// List the titles of all existing pages.
    ///
    /// A missing or empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if enumeration fails (e.g., permission denied).
    fn list(&self) -> Result<Vec<PageId>, StorageError>;

    /// Check if a page exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, title: &PageId) -> bool {
        self.load(title).is_ok()
    }
}
