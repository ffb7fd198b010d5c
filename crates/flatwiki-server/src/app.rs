//! Router construction.
//!
//! Builds the axum router with all routes and middleware. The route table is
//! the URL grammar: `/` plus `/{op}/{id}` for the four page operations, where
//! `{id}` is a single path segment validated by the [`PagePath`] extractor.
//! Everything else falls through to a 404.
//!
//! [`PagePath`]: crate::routes::PagePath

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/view/{id}", get(handlers::pages::view_page))
        .route("/edit/{id}", get(handlers::pages::edit_page))
        .route("/save/{id}", post(handlers::pages::save_page))
        .route("/delete/{id}", post(handlers::pages::delete_page));

    let mut router = Router::new()
        .route("/", get(handlers::index::get_index))
        .merge(page_routes)
        .fallback(not_found);

    for (name, value) in security::HEADERS {
        router = router.layer(security::header_layer(name, value));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Answer paths outside the route grammar.
async fn not_found() -> ServerError {
    ServerError::NotFound
}
