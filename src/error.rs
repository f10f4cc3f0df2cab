//! Error types for the student service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Student Error Enum ==
/// Unified error type for the student service.
#[derive(Error, Debug)]
pub enum StudentError {
    /// No record stored under the requested id
    #[error("Student not found: {0}")]
    NotFound(String),

    /// Request body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Stored bytes do not decode into a student
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Database file stayed locked past the configured wait
    #[error("Timed out waiting for database lock on {0}")]
    LockTimeout(String),

    /// Failure reported by the storage engine
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        match self {
            StudentError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Student not found")),
            )
                .into_response(),
            StudentError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            other => {
                error!("Request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the student service.
pub type Result<T> = std::result::Result<T, StudentError>;
