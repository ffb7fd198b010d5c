//! HTTP request handlers.

pub(crate) mod index;
pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::routes::Route;

/// `302 Found` redirect to `route`.
pub(crate) fn found(route: &Route) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, route.to_string())]).into_response()
}
