//! PostgreSQL implementation of the users repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use usersync_engine::{SyncStatus, Timestamp, User, UserId, ValidUser};

use super::UserRepository;
use crate::error::Result;

const USER_COLUMNS: &str = "id, name, email, synced_at, created_at";

/// A stored user row from the database.
#[derive(Debug)]
pub struct StoredUser {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub synced_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredUser {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(StoredUser {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            synced_at: row.try_get("synced_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<StoredUser> for User {
    fn from(row: StoredUser) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            synced_at: row.synced_at,
            created_at: row.created_at,
        }
    }
}

fn into_users(rows: Vec<StoredUser>) -> Vec<User> {
    rows.into_iter().map(User::from).collect()
}

/// Users repository backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, StoredUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_users(rows))
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, StoredUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, user: ValidUser) -> Result<User> {
        let row = sqlx::query_as::<_, StoredUser>(&format!(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(uuid::Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, StoredUser>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_status(&self, status: SyncStatus) -> Result<Vec<User>> {
        let predicate = match status {
            SyncStatus::Pending => "synced_at IS NULL",
            SyncStatus::Synced => "synced_at IS NOT NULL",
        };

        let rows = sqlx::query_as::<_, StoredUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {predicate} ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_users(rows))
    }

    async fn set_synced_at(
        &self,
        ids: &[UserId],
        synced_at: Option<Timestamp>,
    ) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // UPDATE ... RETURNING has no ordering of its own
        let rows = sqlx::query_as::<_, StoredUser>(&format!(
            r#"
            WITH updated AS (
                UPDATE users SET synced_at = $1
                WHERE id = ANY($2)
                RETURNING {USER_COLUMNS}
            )
            SELECT {USER_COLUMNS} FROM updated
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(synced_at)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_users(rows))
    }
}
