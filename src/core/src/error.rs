//! Unified error types for the Ephemera directory layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type shared by directory implementations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),
}

impl CoreError {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }
}
