use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use common::storage::StorageError;

use crate::thumbnail::ThumbnailError;

/// Application-level error type.
///
/// Every variant renders as a `text/plain` body.
#[derive(Debug)]
pub enum AppError {
    /// The named blob does not exist. The message is returned verbatim.
    NotFound(String),
    /// Blob storage failed or was unreachable.
    Backend(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> String {
        match self {
            AppError::NotFound(msg) => msg,
            AppError::Backend(detail) => {
                tracing::error!("Storage backend error: {}", detail);
                detail
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An unexpected error occurred".into()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.into_body();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Backend(err.to_string())
        }
    }
}

impl From<ThumbnailError> for AppError {
    fn from(err: ThumbnailError) -> Self {
        AppError::Internal(format!("Thumbnail generation failed: {err}"))
    }
}
