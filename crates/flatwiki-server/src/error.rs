//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flatwiki_storage::{InvalidPageId, StorageError};
use flatwiki_templates::TemplateError;

/// Server error type.
///
/// Responses carry the error text as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Path outside the route grammar.
    #[error("404 page not found")]
    NotFound,

    /// Submitted page title is not a valid page identifier.
    #[error("{0}")]
    InvalidTitle(#[from] InvalidPageId),

    /// Page repository failure.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template lookup or rendering failure.
    #[error("{0}")]
    Template(#[from] TemplateError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            Self::Storage(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, format!("{self}\n")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use flatwiki_storage::{PageId, StorageErrorKind};

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServerError::NotFound, StatusCode::NOT_FOUND),
            (
                ServerError::from(PageId::new("no way").unwrap_err()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::from(StorageError::not_found("Home.txt")),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::from(StorageError::new(StorageErrorKind::PermissionDenied)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::from(TemplateError::NotFound("view.html".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn test_response_body_is_error_text() {
        let response =
            ServerError::from(TemplateError::NotFound("view.html".to_owned())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
    }
}
