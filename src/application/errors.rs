use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::RepositoryError;
use crate::infrastructure::cover_store::CoverStoreError;

/// Application-level failure, independent of the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    /// An upstream API (GitHub) failed in a way with no fallback.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        AppError::Unexpected(message.into())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::Conflict(message) => AppError::Conflict(message),
            RepositoryError::Unexpected(message) => AppError::Unexpected(message),
        }
    }
}

impl From<CoverStoreError> for AppError {
    fn from(err: CoverStoreError) -> Self {
        match err {
            CoverStoreError::InvalidImage(message) => AppError::Validation(message),
            CoverStoreError::Io(io) => AppError::Unexpected(io.to_string()),
        }
    }
}

/// `AppError` rendered as a JSON HTTP response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] AppError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError(err.into())
    }
}

impl From<CoverStoreError> for ApiError {
    fn from(err: CoverStoreError) -> Self {
        ApiError(err.into())
    }
}
