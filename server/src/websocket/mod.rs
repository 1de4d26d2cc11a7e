//! Realtime change feed over WebSocket.
//!
//! Each open dashboard session holds one socket. Every committed mutation of
//! the users table is pushed to all sessions as a `change` message.

mod manager;

pub use manager::ConnectionManager;
pub use usersync_engine::{ClientMessage, ServerMessage};
