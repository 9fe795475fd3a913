//! Error types for the parking core.
//!
//! This module defines all error types used throughout the library.
//! Lookups by business key never produce an error; they return `Option`.

use thiserror::Error;

/// Result type alias for parking operations
pub type ParkingResult<T> = Result<T, ParkingError>;

/// Main error type for parking operations
#[derive(Error, Debug)]
pub enum ParkingError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParkingError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ParkingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ParkingError::InvalidArgument(message.into())
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        ParkingError::Conflict(message.into())
    }

    /// True for errors raised by registry invariants rather than bad input
    pub fn is_conflict(&self) -> bool {
        matches!(self, ParkingError::Conflict(_))
    }
}
