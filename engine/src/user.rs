//! User record types.

use crate::{error::Result, Error, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Whether a user has been reconciled with the partner system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// `synced_at` is null
    Pending,
    /// `synced_at` holds the instant of the last sync
    Synced,
}

impl SyncStatus {
    /// Badge label shown next to a user.
    pub fn label(self) -> &'static str {
        match self {
            SyncStatus::Pending => "Pending",
            SyncStatus::Synced => "Synced",
        }
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact email (not unique)
    pub email: String,
    /// When the user was last synced, `None` while pending
    pub synced_at: Option<Timestamp>,
    /// When the user was created; the default ordering key
    pub created_at: Timestamp,
}

impl User {
    /// Create a pending user.
    pub fn new(id: UserId, user: ValidUser, created_at: Timestamp) -> Self {
        Self {
            id,
            name: user.name,
            email: user.email,
            synced_at: None,
            created_at,
        }
    }

    /// Current sync status.
    pub fn status(&self) -> SyncStatus {
        if self.synced_at.is_some() {
            SyncStatus::Synced
        } else {
            SyncStatus::Pending
        }
    }

    /// Check if the user is synced.
    pub fn is_synced(&self) -> bool {
        self.synced_at.is_some()
    }
}

/// Request body for creating a user.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Trim both fields and reject the request if either is missing or blank.
    pub fn validate(&self) -> Result<ValidUser> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty() || email.is_empty() {
            return Err(Error::missing_fields());
        }

        Ok(ValidUser {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
}

/// Result of a bulk sync or unsync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Number of users whose `synced_at` changed
    pub synced_count: usize,
    /// The changed users, after the update
    pub synced_users: Vec<User>,
}

impl SyncResult {
    pub fn new(synced_users: Vec<User>) -> Self {
        Self {
            synced_count: synced_users.len(),
            synced_users,
        }
    }

    /// The zero-count result returned when nothing matched.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Counts shown above the users table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub synced: usize,
    pub pending: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let synced = users.iter().filter(|u| u.is_synced()).count();
        Self {
            total: users.len(),
            synced,
            pending: users.len() - synced,
        }
    }
}
