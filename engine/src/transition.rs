//! Sync status transitions between consecutive snapshots.
//!
//! A row flashes briefly when its user goes from pending to synced. The
//! tracker compares each new snapshot against the `synced_at` values it saw
//! last time; it is fed whenever a snapshot arrives, never while drawing.

use std::collections::HashMap;
use std::time::Duration;

use crate::{Timestamp, User, UserId};

/// How long a "just synced" highlight stays visible.
pub const FLASH_DURATION: Duration = Duration::from_millis(1200);

/// An edge in a user's sync status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTransition {
    /// pending -> synced
    JustSynced,
    /// synced -> pending
    JustUnsynced,
}

/// Compare two `synced_at` values of the same user.
///
/// A re-sync that only moves the timestamp is not a transition.
pub fn detect_transition(
    previous: Option<&Timestamp>,
    current: Option<&Timestamp>,
) -> Option<SyncTransition> {
    match (previous, current) {
        (None, Some(_)) => Some(SyncTransition::JustSynced),
        (Some(_), None) => Some(SyncTransition::JustUnsynced),
        _ => None,
    }
}

/// Remembers the last seen `synced_at` of every user.
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    previous: HashMap<UserId, Option<Timestamp>>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot and return the transitions since the last one.
    ///
    /// Users seen for the first time produce no transition. Users missing
    /// from the snapshot are forgotten.
    pub fn observe(&mut self, users: &[User]) -> Vec<(UserId, SyncTransition)> {
        let mut transitions = Vec::new();
        let mut next = HashMap::with_capacity(users.len());

        for user in users {
            if let Some(previous) = self.previous.get(&user.id) {
                if let Some(t) = detect_transition(previous.as_ref(), user.synced_at.as_ref()) {
                    transitions.push((user.id, t));
                }
            }
            next.insert(user.id, user.synced_at);
        }

        self.previous = next;
        transitions
    }
}
