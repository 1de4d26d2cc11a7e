//! Users endpoint routes.
//!
//! Every response body is an `{data, error}` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use usersync_engine::{Envelope, NewUser, SyncResult, User};

use crate::error::Result;
use crate::handlers;
use crate::AppState;

type Reply<T> = Result<Json<Envelope<T>>>;

fn ok<T>(data: T) -> Reply<T> {
    Ok(Json(Envelope::ok(data)))
}

/// Create users routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_handler).post(create_handler))
        .route("/users/sync", post(sync_all_handler))
        .route("/users/unsync", post(unsync_all_handler))
        .route("/users/{id}", delete(delete_handler))
        .route("/users/{id}/sync", post(sync_handler))
        .route("/users/{id}/unsync", post(unsync_handler))
}

/// GET /users - List users, oldest first.
async fn list_handler(State(state): State<AppState>) -> Reply<Vec<User>> {
    ok(handlers::list_users(&state).await?)
}

/// POST /users - Create a user.
async fn create_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    let Json(request) = body?;
    let user = handlers::create_user(&state, request).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(user))))
}

/// DELETE /users/{id} - Delete a user.
async fn delete_handler(State(state): State<AppState>, Path(id): Path<String>) -> Reply<User> {
    ok(handlers::delete_user(&state, &id).await?)
}

/// POST /users/{id}/sync - Sync one user.
async fn sync_handler(State(state): State<AppState>, Path(id): Path<String>) -> Reply<User> {
    ok(handlers::sync_user(&state, &id).await?)
}

/// POST /users/{id}/unsync - Unsync one user.
async fn unsync_handler(State(state): State<AppState>, Path(id): Path<String>) -> Reply<User> {
    ok(handlers::unsync_user(&state, &id).await?)
}

/// POST /users/sync - Sync every pending user.
async fn sync_all_handler(State(state): State<AppState>) -> Reply<SyncResult> {
    ok(handlers::sync_all(&state).await?)
}

/// POST /users/unsync - Unsync every synced user.
async fn unsync_all_handler(State(state): State<AppState>) -> Reply<SyncResult> {
    ok(handlers::unsync_all(&state).await?)
}
