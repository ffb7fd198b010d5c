//! Mock storage implementation for testing.
//!
//! Provides [`MockPageStore`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::page::{Page, PageId};
use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory page store for testing.
///
/// Use the builder methods to seed pages, or [`MockPageStore::failing`] to get
/// a store whose every operation fails with the given kind.
///
/// # Example
///
/// ```ignore
/// use flatwiki_storage::{MockPageStore, PageId, PageStore};
///
/// let store = MockPageStore::new().with_page("Home", "Welcome");
/// let page = store.load(&PageId::new("Home")?)?;
/// ```
#[derive(Debug, Default)]
pub struct MockPageStore {
    pages: RwLock<BTreeMap<PageId, Vec<u8>>>,
    failure: Option<StorageErrorKind>,
}

impl MockPageStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails with `kind`.
    #[must_use]
    pub fn failing(kind: StorageErrorKind) -> Self {
        Self {
            pages: RwLock::new(BTreeMap::new()),
            failure: Some(kind),
        }
    }

    /// Seed a page.
    ///
    /// # Panics
    ///
    /// Panics if `title` is not a valid page title or the internal lock is
    /// poisoned.
    #[must_use]
    pub fn with_page(self, title: &str, body: impl Into<Vec<u8>>) -> Self {
        let title = PageId::new(title).expect("invalid page title");
        self.pages.write().unwrap().insert(title, body.into());
        self
    }

    fn check(&self, title: Option<&PageId>) -> Result<(), StorageError> {
        match self.failure {
            Some(kind) => {
                let mut err = StorageError::new(kind).with_backend(BACKEND);
                if let Some(title) = title {
                    err = err.with_path(title.as_str());
                }
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn not_found(title: &PageId) -> StorageError {
        StorageError::not_found(title.as_str()).with_backend(BACKEND)
    }
}

impl PageStore for MockPageStore {
    fn load(&self, title: &PageId) -> Result<Page, StorageError> {
        self.check(Some(title))?;
        self.pages
            .read()
            .unwrap()
            .get(title)
            .map(|body| Page::new(title.clone(), body.clone()))
            .ok_or_else(|| Self::not_found(title))
    }

    fn save(&self, title: &PageId, body: &[u8]) -> Result<(), StorageError> {
        self.check(Some(title))?;
        self.pages
            .write()
            .unwrap()
            .insert(title.clone(), body.to_vec());
        Ok(())
    }

    fn delete(&self, title: &PageId) -> Result<(), StorageError> {
        self.check(Some(title))?;
        self.pages
            .write()
            .unwrap()
            .remove(title)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(title))
    }

    fn list(&self) -> Result<Vec<PageId>, StorageError> {
        self.check(None)?;
        Ok(self.pages.read().unwrap().keys().cloned().collect())
    }
}
