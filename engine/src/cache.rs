//! Client-side cache of the users collection.
//!
//! The cache holds one logical entry, [`USERS_KEY`]. Mutations issued by the
//! client invalidate it so the next read re-fetches the list; realtime
//! events patch it in place.

use crate::{reduce_users, User, UserChange};

/// Logical key of the cached users collection.
pub const USERS_KEY: &str = "users";

/// Freshness of the cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheState {
    /// Nothing has been fetched yet
    #[default]
    Empty,
    /// The snapshot matches the last fetch or patch
    Fresh(Vec<User>),
    /// The snapshot is usable but must be re-fetched before it is trusted
    Stale(Vec<User>),
}

/// Cache of the users collection.
#[derive(Debug, Clone, Default)]
pub struct UsersCache {
    state: CacheState,
}

impl UsersCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// Cached users, stale or not.
    pub fn snapshot(&self) -> Option<&[User]> {
        match &self.state {
            CacheState::Empty => None,
            CacheState::Fresh(users) | CacheState::Stale(users) => Some(users),
        }
    }

    /// Check if the next read has to fetch from the server.
    pub fn needs_fetch(&self) -> bool {
        !matches!(self.state, CacheState::Fresh(_))
    }

    /// Store a freshly fetched list.
    pub fn replace(&mut self, users: Vec<User>) {
        self.state = CacheState::Fresh(users);
    }

    /// Mark the cached list as stale.
    pub fn invalidate(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            CacheState::Fresh(users) | CacheState::Stale(users) => CacheState::Stale(users),
            CacheState::Empty => CacheState::Empty,
        };
    }

    /// Patch the cached list with a realtime change.
    ///
    /// Patching never changes freshness, and an empty cache stays empty:
    /// a change alone does not describe the whole collection.
    pub fn apply(&mut self, change: &UserChange) {
        match &mut self.state {
            CacheState::Empty => {}
            CacheState::Fresh(users) | CacheState::Stale(users) => {
                *users = reduce_users(users, change);
            }
        }
    }
}
