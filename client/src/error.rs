//! Error types for the usersync client.

use thiserror::Error;

/// Errors that can occur when talking to a usersync server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with an error envelope
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Realtime socket failed
    #[error("Realtime connection failed: {0}")]
    Realtime(#[from] tokio_tungstenite::tungstenite::Error),
}

impl ClientError {
    /// Check if the server reported the target user as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
