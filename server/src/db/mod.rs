//! Persistence for the `users` table.
//!
//! Handlers talk to a [`UserRepository`]; PostgreSQL backs it in production
//! and [`MemoryUserRepository`] in development and tests.

mod memory;
mod pool;
mod postgres;

pub use memory::*;
pub use pool::*;
pub use postgres::*;

use async_trait::async_trait;
use usersync_engine::{SyncStatus, Timestamp, User, UserId, ValidUser};

use crate::error::Result;

/// Record access operations against the `users` table.
///
/// Implementations never retry; a failed call surfaces as an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Short name of the backing store, reported by the health check.
    fn backend(&self) -> &'static str;

    /// All users, ascending by `created_at`.
    async fn list(&self) -> Result<Vec<User>>;

    /// The user with this id, if any.
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Insert a pending user with a store-assigned id and `created_at`.
    async fn insert(&self, user: ValidUser) -> Result<User>;

    /// Delete a user, returning the row as it was before deletion.
    async fn delete(&self, id: UserId) -> Result<Option<User>>;

    /// All users with the given status, ascending by `created_at`.
    async fn find_by_status(&self, status: SyncStatus) -> Result<Vec<User>>;

    /// Set `synced_at` for every listed user that still exists.
    ///
    /// Returns the updated rows ascending by `created_at`.
    async fn set_synced_at(&self, ids: &[UserId], synced_at: Option<Timestamp>)
        -> Result<Vec<User>>;
}
