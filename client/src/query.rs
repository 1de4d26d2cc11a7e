//! Cached query layer over [`UsersClient`].
//!
//! Reads go through a [`UsersCache`]. Successful mutations invalidate it so
//! the next read re-fetches; realtime changes patch it in place.

use tracing::debug;
use usersync_engine::{SyncResult, User, UserChange, UserId, UsersCache, USERS_KEY};

use crate::client::UsersClient;
use crate::error::Result;

/// Users collection with client-side caching.
#[derive(Debug)]
pub struct UsersQuery {
    client: UsersClient,
    cache: UsersCache,
}

impl UsersQuery {
    pub fn new(client: UsersClient) -> Self {
        Self {
            client,
            cache: UsersCache::new(),
        }
    }

    /// Underlying HTTP client.
    pub fn client(&self) -> &UsersClient {
        &self.client
    }

    /// Cache handed to the presentation layer.
    pub fn cache(&self) -> &UsersCache {
        &self.cache
    }

    /// Current users, fetched only when the cache is empty or stale.
    pub async fn users(&mut self) -> Result<&[User]> {
        if self.cache.needs_fetch() {
            debug!(key = USERS_KEY, "Fetching users");
            let users = self.client.list_users().await?;
            self.cache.replace(users);
        }

        Ok(self.cache.snapshot().unwrap_or_default())
    }

    /// Patch the cache with a realtime change.
    pub fn apply_change(&mut self, change: &UserChange) {
        self.cache.apply(change);
    }

    pub async fn create_user(&mut self, name: &str, email: &str) -> Result<User> {
        let user = self.client.create_user(name, email).await?;
        self.invalidate();
        Ok(user)
    }

    pub async fn delete_user(&mut self, id: UserId) -> Result<User> {
        let user = self.client.delete_user(id).await?;
        self.invalidate();
        Ok(user)
    }

    pub async fn sync_user(&mut self, id: UserId) -> Result<User> {
        let user = self.client.sync_user(id).await?;
        self.invalidate();
        Ok(user)
    }

    pub async fn unsync_user(&mut self, id: UserId) -> Result<User> {
        let user = self.client.unsync_user(id).await?;
        self.invalidate();
        Ok(user)
    }

    pub async fn sync_all(&mut self) -> Result<SyncResult> {
        let result = self.client.sync_all().await?;
        self.invalidate();
        Ok(result)
    }

    pub async fn unsync_all(&mut self) -> Result<SyncResult> {
        let result = self.client.unsync_all().await?;
        self.invalidate();
        Ok(result)
    }

    fn invalidate(&mut self) {
        debug!(key = USERS_KEY, "Invalidating cache");
        self.cache.invalidate();
    }
}
