//! Filesystem storage implementation.
//!
//! Provides [`FsPageStore`], which keeps each page as a single flat file
//! `<root>/<title>.txt` holding the raw body bytes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use uuid::Uuid;

use crate::page::{Page, PageId};
use crate::storage::{PageStore, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension for page files.
pub const PAGE_EXTENSION: &str = "txt";

/// Filesystem page repository.
///
/// The storage root is captured once at construction. It does not need to
/// exist yet: it is created on the first save, and a missing root reads as
/// an empty wiki.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use flatwiki_storage::{FsPageStore, PageId, PageStore};
///
/// let store = FsPageStore::new(PathBuf::from("data"));
/// let title = PageId::new("FrontPage")?;
/// store.save(&title, b"hello")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsPageStore {
    /// Directory holding the page files.
    root: PathBuf,
}

impl FsPageStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// File path backing `title`.
    #[must_use]
    pub fn page_path(&self, title: &PageId) -> PathBuf {
        self.root.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Create the storage root if it does not exist yet.
    fn ensure_root(&self) -> Result<(), StorageError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o750);
        }
        builder
            .create(&self.root)
            .map_err(|e| io_error(e, self.root.clone()))
    }

    /// Write `body` to a fresh temporary file next to the target.
    ///
    /// The name starts with a dot and carries a random suffix, so it never
    /// parses as a page and concurrent writers never share a file.
    fn write_temp(&self, title: &PageId, body: &[u8]) -> Result<PathBuf, StorageError> {
        let tmp_path = self
            .root
            .join(format!(".{title}.{}.tmp", Uuid::new_v4().simple()));

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let result = options
            .open(&tmp_path)
            .and_then(|mut file| {
                file.write_all(body)?;
                file.sync_all()
            });

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(e, tmp_path));
        }
        Ok(tmp_path)
    }
}

fn io_error(err: std::io::Error, path: PathBuf) -> StorageError {
    StorageError::io(err, Some(path)).with_backend(BACKEND)
}

impl PageStore for FsPageStore {
    fn load(&self, title: &PageId) -> Result<Page, StorageError> {
        let path = self.page_path(title);
        let body = fs::read(&path).map_err(|e| io_error(e, path))?;
        Ok(Page::new(title.clone(), body))
    }

    fn save(&self, title: &PageId, body: &[u8]) -> Result<(), StorageError> {
        self.ensure_root()?;

        let path = self.page_path(title);
        let tmp_path = self.write_temp(title, body)?;

        // Rename within one directory replaces the target in a single step,
        // so readers see either the old or the new body.
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(e, path));
        }

        tracing::debug!(title = %title, bytes = body.len(), "Saved page");
        Ok(())
    }

    fn delete(&self, title: &PageId) -> Result<(), StorageError> {
        let path = self.page_path(title);
        fs::remove_file(&path).map_err(|e| io_error(e, path))?;

        tracing::debug!(title = %title, "Deleted page");
        Ok(())
    }

    fn list(&self) -> Result<Vec<PageId>, StorageError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e, self.root.clone())),
        };

        let mut titles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(e, self.root.clone()))?;
            let path = entry.path();

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            if path.extension().is_none_or(|ext| ext != PAGE_EXTENSION) {
                continue;
            }

            // Stems that are not valid titles (temp files, stray files) are not pages
            if let Some(title) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| PageId::new(stem).ok())
            {
                titles.push(title);
            }
        }

        titles.sort();
        Ok(titles)
    }
}
