//! HTTP client for the users API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use usersync_engine::{Envelope, NewUser, SyncResult, User, UserId};

use crate::error::{ClientError, Result};

/// Client for the usersync HTTP API.
///
/// Every call decodes the `{data, error}` envelope; an error envelope is
/// returned as [`ClientError::Api`] with the server's message verbatim.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("usersync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Normalized server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// WebSocket URL of the realtime feed.
    pub fn realtime_url(&self) -> String {
        let url = match self.base_url.strip_prefix("https://") {
            Some(rest) => format!("wss://{}", rest),
            None => format!("ws://{}", self.base_url.trim_start_matches("http://")),
        };
        format!("{}/realtime", url)
    }

    /// All users, ascending by creation time.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.send(self.http.get(self.url("/users"))).await
    }

    /// Create a user.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let body = NewUser::new(name, email);
        self.send(self.http.post(self.url("/users")).json(&body)).await
    }

    /// Delete a user, returning its last state.
    pub async fn delete_user(&self, id: UserId) -> Result<User> {
        self.send(self.http.delete(self.url(&format!("/users/{}", id)))).await
    }

    /// Mark a user as synced.
    pub async fn sync_user(&self, id: UserId) -> Result<User> {
        self.send(self.http.post(self.url(&format!("/users/{}/sync", id)))).await
    }

    /// Mark a user as pending again.
    pub async fn unsync_user(&self, id: UserId) -> Result<User> {
        self.send(self.http.post(self.url(&format!("/users/{}/unsync", id)))).await
    }

    /// Sync every pending user.
    pub async fn sync_all(&self) -> Result<SyncResult> {
        self.send(self.http.post(self.url("/users/sync"))).await
    }

    /// Return every synced user to pending.
    pub async fn unsync_all(&self) -> Result<SyncResult> {
        self.send(self.http.post(self.url("/users/unsync"))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(status = status.as_u16(), "Users API responded");

        let envelope: Envelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::ParseError(format!(
                    "Failed to parse envelope: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: text,
                });
            }
        };

        envelope.into_result().map_err(|message| ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
