//! Unified error handling for the server.
//!
//! Every failure is answered with the `{data: null, error}` envelope.

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use usersync_engine::Envelope;

/// Message for a user id that does not resolve to a row.
pub const USER_NOT_FOUND: &str = "User not found";

/// Message for unexpected failures whose details stay in the logs.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Engine(usersync_engine::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The 404 returned for unknown user ids.
    pub fn user_not_found() -> Self {
        AppError::NotFound(USER_NOT_FOUND.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Engine(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<usersync_engine::Error> for AppError {
    fn from(err: usersync_engine::Error) -> Self {
        use usersync_engine::Error as EngineError;

        match err {
            EngineError::Validation(_) => AppError::Engine(err),
            EngineError::UserAlreadyExists(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                INTERNAL_ERROR.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(Envelope::<()>::error(message))).into_response()
    }
}

/// Turn a handler panic into the enveloped 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
