//! Configuration management for the server.

use std::env;
use std::time::Duration;

/// Simulated partner-system latency applied before each sync write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncDelays {
    /// Delay before syncing or unsyncing a single user
    pub single: Duration,
    /// Delay before a sync-all batch
    pub sync_all: Duration,
    /// Delay before an unsync-all batch
    pub unsync_all: Duration,
}

impl SyncDelays {
    /// No delays at all.
    pub const fn none() -> Self {
        Self {
            single: Duration::ZERO,
            sync_all: Duration::ZERO,
            unsync_all: Duration::ZERO,
        }
    }
}

impl Default for SyncDelays {
    fn default() -> Self {
        Self {
            single: Duration::from_millis(600),
            sync_all: Duration::from_millis(1500),
            unsync_all: Duration::from_millis(600),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// Simulated sync latencies
    pub delays: SyncDelays,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            delays: SyncDelays::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort)?,
            None => defaults.port,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let delays = SyncDelays {
            single: delay(&lookup, "SYNC_DELAY_MS", defaults.delays.single)?,
            sync_all: delay(&lookup, "SYNC_ALL_DELAY_MS", defaults.delays.sync_all)?,
            unsync_all: delay(&lookup, "UNSYNC_ALL_DELAY_MS", defaults.delays.unsync_all)?,
        };

        Ok(Self {
            host,
            port,
            database_url,
            delays,
        })
    }
}

fn delay(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDelay(key)),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid {0} value, expected milliseconds")]
    InvalidDelay(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.delays, SyncDelays::default());
        assert_eq!(config.delays.sync_all, Duration::from_millis(1500));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/usersync"),
            ("SYNC_DELAY_MS", "0"),
            ("SYNC_ALL_DELAY_MS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/usersync")
        );
        assert_eq!(config.delays.single, Duration::ZERO);
        assert_eq!(config.delays.sync_all, Duration::from_millis(10));
        assert_eq!(config.delays.unsync_all, Duration::from_millis(600));
    }

    #[test]
    fn empty_database_url_means_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort)
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SYNC_ALL_DELAY_MS", "-1")])),
            Err(ConfigError::InvalidDelay("SYNC_ALL_DELAY_MS"))
        ));
    }
}
