//! URL grammar.
//!
//! Valid paths are `/` and `/{view,edit,save,delete}/<id>` where `<id>`
//! matches `[a-zA-Z0-9]+`. The router matches the shape; [`PagePath`]
//! validates the identifier, so a handler never sees a title that could
//! leave the storage root.

use std::fmt;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use flatwiki_storage::PageId;

use crate::error::ServerError;

/// Navigation target, rendered to its canonical path with `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Index,
    /// `/view/<id>`
    View(PageId),
    /// `/edit/<id>`
    Edit(PageId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("/"),
            Self::View(id) => write!(f, "/view/{id}"),
            Self::Edit(id) => write!(f, "/edit/{id}"),
        }
    }
}

/// Page identifier taken from the `{id}` path segment.
///
/// The segment is percent-decoded by axum before validation, so encoded
/// separators or spaces (`..%2F`, `%20`) are rejected as well. Rejection is
/// a 404: a bad identifier is simply a path outside the grammar.
#[derive(Debug)]
pub(crate) struct PagePath(pub(crate) PageId);

impl<S> FromRequestParts<S> for PagePath
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ServerError::NotFound)?;

        match PageId::new(raw) {
            Ok(id) => Ok(Self(id)),
            Err(e) => {
                tracing::debug!(title = e.input(), "Rejected page identifier");
                Err(ServerError::NotFound)
            }
        }
    }
}
