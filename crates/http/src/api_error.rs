//! Typed error for HTTP handlers.
//!
//! Converts domain errors into an HTML error page with the matching status
//! code. Handlers return `Result<Html<String>, ApiError>` (or `Json` for the
//! read-only API) instead of bare `StatusCode`s.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use wortschatz_core::VocabError;
use wortschatz_storage::StorageError;

use crate::pages;

/// Handler error with HTTP status and human-readable message.
///
/// `Internal` logs the real error server-side and shows a static message
/// to the browser.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: rejected form input.
    BadRequest(String),
    /// 404 Not Found: unknown topic or entry.
    NotFound(String),
    /// 422 Unprocessable Entity: well-formed but conflicting, e.g. duplicate topic.
    UnprocessableEntity(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::UnprocessableEntity(msg) => msg,
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                "internal server error".to_owned()
            },
        };
        (status, Html(pages::error_page(status, &message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound(format!("{entity} '{id}' not found")),
            StorageError::InvalidInput(msg) => Self::BadRequest(msg),
            ref e if e.is_duplicate() => Self::UnprocessableEntity(err.to_string()),
            _ => Self::Internal(err.into()),
        }
    }
}

impl From<VocabError> for ApiError {
    fn from(err: VocabError) -> Self {
        if err.is_invalid_input() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.into())
        }
    }
}
