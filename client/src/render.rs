//! Text rendering of the users dashboard.
//!
//! Everything here is a pure function of a users snapshot. Which rows are
//! flashing is decided by the caller through [`Flashes`].

use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::time::Instant;

use usersync_engine::{SyncStatus, Timestamp, User, UserId, UserStats, FLASH_DURATION};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rows currently showing the "just synced" mark.
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    until: HashMap<UserId, Instant>,
}

impl Flashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a flash for `id` lasting [`FLASH_DURATION`].
    pub fn mark(&mut self, id: UserId, now: Instant) {
        self.until.insert(id, now + FLASH_DURATION);
    }

    /// Ids still flashing at `now`.
    pub fn active(&self, now: Instant) -> HashSet<UserId> {
        self.until
            .iter()
            .filter(|(_, until)| **until > now)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop expired flashes. Returns true if any were dropped.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.until.len();
        self.until.retain(|_, until| *until > now);
        self.until.len() != before
    }

    /// Earliest moment a flash expires.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.until.values().min().copied()
    }
}

/// Status badge shown in the table.
pub fn badge(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Synced => "[Synced]",
        SyncStatus::Pending => "[Pending]",
    }
}

/// One-line summary of the counts.
pub fn stats_line(stats: &UserStats) -> String {
    format!(
        "Total: {}  Synced: {}  Pending: {}",
        stats.total, stats.synced, stats.pending
    )
}

fn format_time(timestamp: Option<&Timestamp>) -> String {
    timestamp
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One table row.
pub fn user_row(user: &User, flashing: bool) -> String {
    let mark = if flashing { "*" } else { " " };
    format!(
        "{} {:<36}  {:<20}  {:<28}  {:<9}  {:<19}  {}",
        mark,
        user.id,
        user.name,
        user.email,
        badge(user.status()),
        format_time(user.synced_at.as_ref()),
        format_time(Some(&user.created_at)),
    )
}

/// Table of users; rows in `flashing` carry the just-synced mark.
pub fn render_table(users: &[User], flashing: &HashSet<UserId>) -> String {
    if users.is_empty() {
        return "No users yet\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<36}  {:<20}  {:<28}  {:<9}  {:<19}  {}",
        "ID", "NAME", "EMAIL", "STATUS", "SYNCED AT", "CREATED AT"
    );
    for user in users {
        let _ = writeln!(out, "{}", user_row(user, flashing.contains(&user.id)));
    }
    out
}

/// Stats strip followed by the table.
pub fn render_dashboard(users: &[User], flashing: &HashSet<UserId>) -> String {
    let stats = UserStats::from_users(users);
    format!("{}\n\n{}", stats_line(&stats), render_table(users, flashing))
}
