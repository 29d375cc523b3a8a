//! Connection configuration.

use serde::Deserialize;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::connection::SqliteConnection;
use crate::error::{DbError, Result};

/// Default database URL: a private in-memory SQLite database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings for opening a connection pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DbConfig {
    /// Database URL, e.g. `sqlite:app.db` or `sqlite::memory:`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_url() -> String {
    String::from(DEFAULT_DATABASE_URL)
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DbConfig {
    /// Creates a config for `url` with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`, falling back to
    /// the defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("DATABASE_URL").unwrap_or_else(default_url);
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                DbError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(DbError::Config(String::from(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            )));
        }
        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Opens a SQLite pool with these settings.
    pub async fn connect(&self) -> Result<SqliteConnection> {
        info!(url = %self.url, max_connections = self.max_connections, "Opening connection pool");
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await?;
        Ok(SqliteConnection::new(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DbConfig::default());
        assert_eq!(config.url, "sqlite::memory:");
    }

    #[test]
    fn test_reads_values() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite:app.db"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();
        assert_eq!(config, DbConfig::new("sqlite:app.db").max_connections(2));
    }

    #[test]
    fn test_rejects_bad_pool_size() {
        let err = DbConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")]))
            .unwrap_err();
        assert!(matches!(err, DbError::Config(_)));

        let err = DbConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")]))
            .unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DbConfig = serde_json::from_str(r#"{ "url": "sqlite:x.db" }"#).unwrap();
        assert_eq!(config.url, "sqlite:x.db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
