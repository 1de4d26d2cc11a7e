//! Request handlers for the users table.
//!
//! Handlers hold the operation semantics; the routes only adapt HTTP to them.

mod realtime;
mod sync;
mod users;

pub use realtime::*;
pub use sync::*;
pub use users::*;
