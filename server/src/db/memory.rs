//! In-memory users repository for development and testing.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use usersync_engine::{SyncStatus, Timestamp, User, UserId, UserStore, ValidUser};

use super::UserRepository;
use crate::error::Result;

/// Users repository holding the table in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    store: RwLock<UserStore>,
}

impl MemoryUserRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.store.read().await.list().to_vec())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: ValidUser) -> Result<User> {
        let mut store = self.store.write().await;
        Ok(store.insert(uuid::Uuid::new_v4(), user, Utc::now())?)
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.store.write().await.remove(&id))
    }

    async fn find_by_status(&self, status: SyncStatus) -> Result<Vec<User>> {
        Ok(self.store.read().await.select_by_status(status))
    }

    async fn set_synced_at(
        &self,
        ids: &[UserId],
        synced_at: Option<Timestamp>,
    ) -> Result<Vec<User>> {
        Ok(self.store.write().await.set_synced_at(ids, synced_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersync_engine::NewUser;

    fn valid(name: &str) -> ValidUser {
        NewUser::new(name, "x@example.com").validate().unwrap()
    }

    #[tokio::test]
    async fn insert_list_delete() {
        let repo = MemoryUserRepository::new();

        let ada = repo.insert(valid("Ada")).await.unwrap();
        let bob = repo.insert(valid("Bob")).await.unwrap();
        assert_ne!(ada.id, bob.id);
        assert!(ada.created_at <= bob.created_at);

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Bob"]);

        assert_eq!(repo.delete(ada.id).await.unwrap(), Some(ada.clone()));
        assert_eq!(repo.get(ada.id).await.unwrap(), None);
        assert_eq!(repo.delete(ada.id).await.unwrap(), None);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn status_queries() {
        let repo = MemoryUserRepository::new();
        let ada = repo.insert(valid("Ada")).await.unwrap();
        repo.insert(valid("Bob")).await.unwrap();

        let now = Utc::now();
        let updated = repo.set_synced_at(&[ada.id], Some(now)).await.unwrap();
        assert_eq!(updated[0].synced_at, Some(now));

        assert_eq!(repo.find_by_status(SyncStatus::Synced).await.unwrap().len(), 1);
        assert_eq!(repo.find_by_status(SyncStatus::Pending).await.unwrap().len(), 1);
    }
}
