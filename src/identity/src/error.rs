//! Error types for user records

use thiserror::Error;

/// Message carried by every read-only rejection
pub const READ_ONLY_MESSAGE: &str = "In memory user model is not writable";

/// User record errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Mutation attempted while the record is read-only
    #[error("Read-only: {0}")]
    ReadOnly(String),

    /// Record options could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IdentityError {
    /// The error returned by gated mutators on a read-only record
    pub fn read_only() -> Self {
        IdentityError::ReadOnly(READ_ONLY_MESSAGE.to_string())
    }

    /// Whether this is a read-only rejection
    pub fn is_read_only(&self) -> bool {
        matches!(self, IdentityError::ReadOnly(_))
    }
}

/// Result type for user record operations
pub type Result<T> = std::result::Result<T, IdentityError>;
