//! Wire protocol shared by the server and its clients.
//!
//! HTTP responses are wrapped in an [`Envelope`]. Realtime messages are JSON
//! text frames tagged by `type` and use snake_case field names.

use serde::{Deserialize, Serialize};

use crate::UserChange;

/// Uniform `{data, error}` body of every users endpoint.
///
/// Exactly one of the two fields is non-null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// A success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// An error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    /// Split into the payload or the error message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (_, Some(message)) => Err(message),
            (Some(data), None) => Ok(data),
            (None, None) => Err("response carried neither data nor error".to_string()),
        }
    }
}

/// Messages sent from client to server over the realtime socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Keep-alive ping.
    Ping,
}

/// Messages sent from server to client over the realtime socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A committed change to the users table.
    Change { change: UserChange },

    /// Response to ping.
    Pong,

    /// Error message.
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

impl From<UserChange> for ServerMessage {
    fn from(change: UserChange) -> Self {
        ServerMessage::Change { change }
    }
}
