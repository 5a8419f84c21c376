use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::views;

/// Failures that end a request with an error page instead of a redirect.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::Store(StoreError::DuplicateEpoch(epoch)) => (
                StatusCode::CONFLICT,
                "Conflict",
                format!("An event was already recorded this second ({epoch}). Please submit again."),
            ),
            AppError::Store(StoreError::Database(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "The event could not be saved.".to_string(),
            ),
        };

        error!(status = %status, error = %self, "request failed");
        (status, Html(views::error_page(title, &message))).into_response()
    }
}
