//! Error types for the record service.
//!
//! The store layer distinguishes exactly two failure classes: the backend is
//! unreachable, or something else went wrong. Connectivity failures surface
//! uniformly as HTTP 400 with a fixed body on every endpoint; anything else
//! is logged and reported as a 500.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure classes of the key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Redis connection refused")]
    Unavailable,

    /// Any other backend failure.
    #[error("{0}")]
    Internal(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_io_error() || err.is_connection_dropped() {
            StoreError::Unavailable
        } else {
            StoreError::Internal(err.to_string())
        }
    }
}

impl StoreError {
    /// Maps a store failure to its HTTP status and body.
    ///
    /// Connectivity refusals are reported as 400 with a fixed body; internal
    /// failures are logged server-side and reported as a generic 500.
    pub fn response(self) -> (StatusCode, String) {
        match self {
            StoreError::Unavailable => (
                StatusCode::BAD_REQUEST,
                "Redis connection refused".to_string(),
            ),
            StoreError::Internal(detail) => {
                tracing::error!("Error in operation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {}", detail),
                )
            }
        }
    }
}
