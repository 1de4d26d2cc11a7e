//! usersync server - HTTP and realtime endpoints for the users dashboard.
//!
//! The server exposes CRUD and simulated partner-sync operations over a single
//! `users` table. Every users endpoint answers with a `{data, error}`
//! envelope, and every committed change is pushed to realtime subscribers.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod websocket;

use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::websocket::ConnectionManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn UserRepository>,
    pub config: Arc<Config>,
    pub conn_manager: Arc<ConnectionManager>,
}

impl AppState {
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self {
            repo,
            config: Arc::new(config),
            conn_manager: ConnectionManager::new_shared(),
        }
    }
}

/// Build the application router with all middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
