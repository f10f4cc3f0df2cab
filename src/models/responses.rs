//! Response DTOs for the student API
//!
//! Successful responses serialize `Student` directly; this holds the error body.

use serde::Serialize;

/// Error response body for client-facing error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
