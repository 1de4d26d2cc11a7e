//! Error types for the usersync engine.

use thiserror::Error;

/// All possible errors from the usersync engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Store errors
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
}

impl Error {
    /// Message used when a create request lacks a name or an email.
    pub const MISSING_FIELDS: &'static str = "Name and email are required";

    /// Create the validation error for a create request missing its fields.
    pub fn missing_fields() -> Self {
        Error::Validation(Self::MISSING_FIELDS.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
