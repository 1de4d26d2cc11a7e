//! # usersync engine
//!
//! Core logic for the usersync dashboard: the `users` record model, an
//! in-memory users table, realtime change events and the client-side cache
//! that consumes them.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about HTTP, sockets or databases
//! - **Explicit time**: operations that stamp records take `now` as input
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Users
//!
//! A [`User`] has an id, a name, an email, a creation timestamp and a
//! nullable `synced_at`. A null `synced_at` means the user is
//! [`SyncStatus::Pending`]; a timestamp means [`SyncStatus::Synced`].
//!
//! ### Store
//!
//! [`UserStore`] is an in-memory `users` table that always lists records in
//! ascending `created_at` order.
//!
//! ### Changes and Cache
//!
//! Mutations are published as [`UserChange`] events. A client keeps a
//! [`UsersCache`] that is either invalidated after its own mutations or
//! patched in place by [`reduce_users`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use usersync_engine::{NewUser, SyncStatus, UserStore};
//! use uuid::Uuid;
//!
//! let mut store = UserStore::new();
//! let new_user = NewUser::new("Ada", "ada@example.com").validate().unwrap();
//! let user = store.insert(Uuid::new_v4(), new_user, Utc::now()).unwrap();
//! assert_eq!(user.status(), SyncStatus::Pending);
//!
//! let synced = store.set_synced_at(&[user.id], Some(Utc::now()));
//! assert_eq!(synced[0].status(), SyncStatus::Synced);
//! ```

pub mod cache;
pub mod change;
pub mod error;
pub mod protocol;
pub mod store;
pub mod transition;
pub mod user;

// Re-export main types at crate root
pub use cache::{CacheState, UsersCache, USERS_KEY};
pub use change::{reduce_users, UserChange};
pub use error::Error;
pub use protocol::{ClientMessage, Envelope, ServerMessage};
pub use store::UserStore;
pub use transition::{detect_transition, SyncTransition, TransitionTracker, FLASH_DURATION};
pub use user::{NewUser, SyncResult, SyncStatus, User, UserStats, ValidUser};

/// Type aliases for clarity
pub type UserId = uuid::Uuid;
pub type Timestamp = chrono::DateTime<chrono::Utc>;
