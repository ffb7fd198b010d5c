//! Page operations: view, edit, save, delete.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use flatwiki_storage::{Page, PageId};
use flatwiki_templates::{Content, EditData, ViewData};
use crate::error::ServerError;
use crate::form::SaveForm;
use crate::handlers::found;
use crate::routes::{PagePath, Route};
use crate::state::AppState;

/// Handle GET /view/{id}.
///
/// A page that does not exist redirects to its edit form.
pub(crate) async fn view_page(
    State(state): State<Arc<AppState>>,
    PagePath(id): PagePath,
) -> Result<Response, ServerError> {
    let page = match state.store.load(&id) {
        Ok(page) => page,
        Err(e) if e.is_not_found() => return Ok(found(&Route::Edit(id))),
        Err(e) => return Err(e.into()),
    };

    let html = state.templates.render(
        &format!("View {id}"),
        &Content::View(ViewData {
            body: page.body_text(),
            title: page.title.into_string(),
        }),
    )?;
    Ok(Html(html).into_response())
}

/// Handle GET /edit/{id}.
///
/// A page that does not exist yet gets a blank form.
pub(crate) async fn edit_page(
    State(state): State<Arc<AppState>>,
    PagePath(id): PagePath,
) -> Result<Html<String>, ServerError> {
    let title = format!("Edit {id}");
    let (page, is_new) = match state.store.load(&id) {
        Ok(page) => (page, false),
        Err(e) if e.is_not_found() => (Page::blank(id), true),
        Err(e) => return Err(e.into()),
    };

    let html = state.templates.render(
        &title,
        &Content::Edit(EditData {
            body: page.body_text(),
            title: page.title.into_string(),
            is_new,
        }),
    )?;
    Ok(Html(html))
}

/// Handle POST /save/{id}.
///
/// The form's `title` field is re-validated before it is used as a storage
/// key; it may differ from the path identifier.
pub(crate) async fn save_page(
    State(state): State<Arc<AppState>>,
    PagePath(id): PagePath,
    form: SaveForm,
) -> Result<Response, ServerError> {
    let title = match form.title.filter(|t| !t.is_empty()) {
        Some(title) => PageId::new(title)?,
        None => id,
    };

    state.store.save(&title, &form.body)?;
    tracing::info!(title = %title, "Page saved");

    Ok(found(&Route::View(title)))
}

/// Handle POST /delete/{id}.
pub(crate) async fn delete_page(
    State(state): State<Arc<AppState>>,
    PagePath(id): PagePath,
) -> Result<Response, ServerError> {
    state.store.delete(&id)?;
    tracing::info!(title = %id, "Page deleted");

    Ok(found(&Route::Index))
}
