//! Error types for store clients.

use thiserror::Error;

/// Result type for store operations.
pub type DriveResult<T> = Result<T, DriveError>;

/// Errors that can occur talking to a remote store.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The requested file does not exist or is not visible.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The store answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Missing, rejected or unrefreshable credentials.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Response or snapshot could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriveError {
    /// Returns true if this error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            DriveError::NotFound(_) => true,
            DriveError::Api { status, .. } => *status == 404,
            _ => false,
        }
    }
}
