//! usersync client - HTTP and realtime access to a usersync server.
//!
//! [`UsersClient`] wraps the users API one call per endpoint.
//! [`UsersQuery`] layers the engine's cache on top of it, and
//! [`RealtimeSubscription`] streams committed changes from `/realtime`.
//! The [`render`] module turns a users snapshot into dashboard text.

pub mod client;
pub mod error;
pub mod query;
pub mod realtime;
pub mod render;

pub use client::UsersClient;
pub use error::{ClientError, Result};
pub use query::UsersQuery;
pub use realtime::RealtimeSubscription;
