//! Page index.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use flatwiki_storage::PageId;
use flatwiki_templates::{Content, IndexData};

use crate::error::ServerError;
use crate::state::AppState;

/// Document title of the index page.
const INDEX_TITLE: &str = "All Pages";

/// Handle GET /.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let items = state
        .store
        .list()?
        .into_iter()
        .map(PageId::into_string)
        .collect();

    let html = state
        .templates
        .render(INDEX_TITLE, &Content::Index(IndexData { items }))?;
    Ok(Html(html))
}
