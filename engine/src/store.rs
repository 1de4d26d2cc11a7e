//! UserStore - the in-memory `users` table.
//!
//! Records are kept sorted by `created_at` so every read returns them in the
//! default order. Records sharing a `created_at` keep their insertion order.

use crate::{error::Result, Error, SyncStatus, Timestamp, User, UserId, ValidUser};

/// In-memory `users` table.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// All users, ascending by `created_at`.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Get a user by ID.
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == *id)
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the table has no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Insert a pending user created at `now`.
    pub fn insert(&mut self, id: UserId, user: ValidUser, now: Timestamp) -> Result<User> {
        if self.get(&id).is_some() {
            return Err(Error::UserAlreadyExists(id.to_string()));
        }

        let user = User::new(id, user, now);
        self.insert_sorted(user.clone());
        Ok(user)
    }

    /// Remove a user, returning the row as it was before deletion.
    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == *id)?;
        Some(self.users.remove(index))
    }

    /// All users with the given status, ascending by `created_at`.
    pub fn select_by_status(&self, status: SyncStatus) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| u.status() == status)
            .cloned()
            .collect()
    }

    /// Set `synced_at` on every listed user that still exists.
    ///
    /// Returns the updated rows in table order. Unknown ids are skipped.
    pub fn set_synced_at(&mut self, ids: &[UserId], synced_at: Option<Timestamp>) -> Vec<User> {
        self.users
            .iter_mut()
            .filter(|u| ids.contains(&u.id))
            .map(|u| {
                u.synced_at = synced_at;
                u.clone()
            })
            .collect()
    }

    fn insert_sorted(&mut self, user: User) {
        let index = self
            .users
            .partition_point(|u| u.created_at <= user.created_at);
        self.users.insert(index, user);
    }
}
