//! Realtime change events and the reducer that applies them.

use crate::{User, UserId};
use serde::{Deserialize, Serialize};

/// A committed mutation of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UserChange {
    /// A user was created
    Insert { user: User },
    /// A user's row changed (sync or unsync)
    Update { user: User },
    /// A user was deleted
    Delete { id: UserId },
}

impl UserChange {
    /// ID of the affected user.
    pub fn user_id(&self) -> UserId {
        match self {
            UserChange::Insert { user } | UserChange::Update { user } => user.id,
            UserChange::Delete { id } => *id,
        }
    }
}

/// Apply a change to a snapshot of the users collection.
///
/// The result stays ordered by `created_at`. An insert for an id already
/// present replaces that row, and an update for an unknown id inserts it, so
/// events that arrive out of order still converge on the store's state.
pub fn reduce_users(users: &[User], change: &UserChange) -> Vec<User> {
    match change {
        UserChange::Insert { user } | UserChange::Update { user } => {
            let mut next: Vec<User> = users.iter().filter(|u| u.id != user.id).cloned().collect();
            let index = next.partition_point(|u| u.created_at <= user.created_at);
            next.insert(index, user.clone());
            next
        }
        UserChange::Delete { id } => users.iter().filter(|u| u.id != *id).cloned().collect(),
    }
}
