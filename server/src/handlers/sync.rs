//! Sync handlers - simulated reconciliation with the partner system.
//!
//! No partner system is called. A sync waits a fixed delay and then stamps
//! `synced_at`; an unsync waits and clears it. The delays only make the
//! in-flight state observable and are not a timeout contract.

use std::time::Duration;

use chrono::Utc;
use usersync_engine::{SyncResult, SyncStatus, Timestamp, User, UserChange};

use super::parse_user_id;
use crate::error::{AppError, Result};
use crate::AppState;

/// Mark one user as synced.
///
/// Already synced users are returned unchanged without waiting.
pub async fn sync_user(state: &AppState, raw_id: &str) -> Result<User> {
    set_user_status(state, raw_id, SyncStatus::Synced).await
}

/// Mark one user as pending again.
///
/// Already pending users are returned unchanged without waiting.
pub async fn unsync_user(state: &AppState, raw_id: &str) -> Result<User> {
    set_user_status(state, raw_id, SyncStatus::Pending).await
}

/// Sync every pending user in one batch.
pub async fn sync_all(state: &AppState) -> Result<SyncResult> {
    set_all_status(state, SyncStatus::Synced, state.config.delays.sync_all).await
}

/// Return every synced user to pending in one batch.
pub async fn unsync_all(state: &AppState) -> Result<SyncResult> {
    set_all_status(state, SyncStatus::Pending, state.config.delays.unsync_all).await
}

fn stamp_for(target: SyncStatus) -> Option<Timestamp> {
    match target {
        SyncStatus::Synced => Some(Utc::now()),
        SyncStatus::Pending => None,
    }
}

async fn set_user_status(state: &AppState, raw_id: &str, target: SyncStatus) -> Result<User> {
    let id = parse_user_id(raw_id)?;
    let user = state
        .repo
        .get(id)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    if user.status() == target {
        tracing::debug!(user_id = %id, status = target.label(), "User already in target state");
        return Ok(user);
    }

    simulate_latency(state.config.delays.single).await;

    // The row may have been deleted while we waited
    let user = state
        .repo
        .set_synced_at(&[id], stamp_for(target))
        .await?
        .into_iter()
        .next()
        .ok_or_else(AppError::user_not_found)?;

    tracing::info!(user_id = %id, status = target.label(), "Updated user sync status");
    state
        .conn_manager
        .publish([UserChange::Update { user: user.clone() }]);

    Ok(user)
}

async fn set_all_status(state: &AppState, target: SyncStatus, delay: Duration) -> Result<SyncResult> {
    let source = match target {
        SyncStatus::Synced => SyncStatus::Pending,
        SyncStatus::Pending => SyncStatus::Synced,
    };

    let selected = state.repo.find_by_status(source).await?;
    if selected.is_empty() {
        tracing::debug!(status = source.label(), "No users to update");
        return Ok(SyncResult::empty());
    }

    simulate_latency(delay).await;

    let ids: Vec<_> = selected.iter().map(|u| u.id).collect();
    let updated = state.repo.set_synced_at(&ids, stamp_for(target)).await?;

    tracing::info!(
        count = updated.len(),
        status = target.label(),
        "Bulk updated user sync status"
    );
    state.conn_manager.publish(
        updated
            .iter()
            .cloned()
            .map(|user| UserChange::Update { user }),
    );

    Ok(SyncResult::new(updated))
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
