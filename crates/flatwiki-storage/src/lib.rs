//! Page repository for flatwiki.
//!
//! Maps a page title to a single text file under a storage root and provides
//! load, save, delete and list over those files.
//!
//! # Architecture
//!
//! - [`PageId`]: validated page title (`[a-zA-Z0-9]+`), the only key accepted
//!   by storage operations
//! - [`PageStore`]: repository trait shared by all backends
//! - [`FsPageStore`]: one `<root>/<title>.txt` file per page
//! - [`MockPageStore`]: in-memory backend for tests (requires `mock` feature)

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod page;
mod storage;

pub use fs::{FsPageStore, PAGE_EXTENSION};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockPageStore;
pub use page::{InvalidPageId, Page, PageId};
pub use storage::{PageStore, StorageError, StorageErrorKind};
