//! HTTP route definitions.

mod health;
mod realtime;
mod users;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(realtime::routes())
}
