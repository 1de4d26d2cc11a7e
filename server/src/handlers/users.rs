//! Users handlers - list, create and delete.

use usersync_engine::{NewUser, User, UserChange, UserId};

use crate::error::{AppError, Result};
use crate::AppState;

/// Parse a path id. Anything that is not a UUID cannot name a user.
pub fn parse_user_id(raw: &str) -> Result<UserId> {
    uuid::Uuid::parse_str(raw).map_err(|_| AppError::user_not_found())
}

/// List all users, oldest first.
pub async fn list_users(state: &AppState) -> Result<Vec<User>> {
    state.repo.list().await
}

/// Validate and insert a new pending user.
pub async fn create_user(state: &AppState, request: NewUser) -> Result<User> {
    let valid = request.validate()?;
    let user = state.repo.insert(valid).await?;

    tracing::info!(user_id = %user.id, "Created user");
    state
        .conn_manager
        .publish([UserChange::Insert { user: user.clone() }]);

    Ok(user)
}

/// Delete a user, returning the deleted row.
pub async fn delete_user(state: &AppState, raw_id: &str) -> Result<User> {
    let id = parse_user_id(raw_id)?;
    let user = state
        .repo
        .delete(id)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    tracing::info!(user_id = %user.id, "Deleted user");
    state.conn_manager.publish([UserChange::Delete { id: user.id }]);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uuid_id_is_not_found() {
        assert!(matches!(
            parse_user_id("42"),
            Err(AppError::NotFound(msg)) if msg == "User not found"
        ));
        assert!(parse_user_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
