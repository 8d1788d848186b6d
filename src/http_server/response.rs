//! # Response Formatting
//!
//! JSON bodies returned by the book endpoints.

use serde::Serialize;

/// Body carrying only a human-readable message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body carrying a message and the affected record
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Error body. `error` is a string, or a list of strings for body validation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<E: Serialize> {
    pub error: E,
}

impl<E: Serialize> ErrorResponse<E> {
    pub fn new(error: E) -> Self {
        Self { error }
    }
}
