//! Realtime change feed endpoint.

use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Router,
};

use crate::handlers::handle_realtime_connection;
use crate::AppState;

/// Create realtime routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/realtime", get(realtime_handler))
}

/// GET /realtime - Upgrade to a WebSocket carrying user changes.
async fn realtime_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let conn_manager = state.conn_manager.clone();
    ws.on_upgrade(move |socket| handle_realtime_connection(socket, conn_manager))
}
