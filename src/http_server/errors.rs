//! # API Errors
//!
//! Every failure a book request can end in, and its HTTP rendering.
//! Storage faults are logged in full and answered with a generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::response::ErrorResponse;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for book handlers
pub type ApiResult<T> = Result<T, ApiError>;

pub const NOT_FOUND_MESSAGE: &str = "Book not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const INVALID_PARAMETER_MESSAGE: &str = "Invalid parameter";

/// Book API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body or identifier failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Path could not be decoded into parameters at all
    #[error("Invalid parameter")]
    InvalidParameter,

    /// Persistence layer failure, including not-found
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidParameter => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(ValidationError::Body(messages)) => {
                tracing::debug!(?messages, "book body rejected");
                (status, Json(ErrorResponse::new(messages))).into_response()
            }
            ApiError::Validation(err @ ValidationError::Param { .. }) => {
                tracing::debug!(error = %err, "path parameter rejected");
                (status, Json(ErrorResponse::new(err.to_string()))).into_response()
            }
            ApiError::InvalidParameter => {
                (status, Json(ErrorResponse::new(INVALID_PARAMETER_MESSAGE))).into_response()
            }
            ApiError::Store(StoreError::NotFound(id)) => {
                tracing::debug!(%id, "book not found");
                (status, Json(ErrorResponse::new(NOT_FOUND_MESSAGE))).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "book request failed");
                (status, Json(ErrorResponse::new(INTERNAL_MESSAGE))).into_response()
            }
        }
    }
}
