//! Configuration of the SQLite connection.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// How to open the booking database.
///
/// ```
/// use pousada_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// // A private in-memory database
/// let config = SqliteConfig::default();
///
/// // A database file next to the binary
/// let config = SqliteConfig {
///     database_path: Some(PathBuf::from("pousada.db")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Database file path. If None, uses an in-memory database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Whether to create the database file if it doesn't exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,

    /// How long a connection waits on a locked database before failing
    #[serde(default = "default_busy_timeout", with = "humantime_serde")]
    pub busy_timeout: Duration,

    /// Upper bound on concurrent read connections
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,
}

fn default_true() -> bool {
    true
}

fn default_busy_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_max_readers() -> u32 {
    8
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            busy_timeout: default_busy_timeout(),
            max_readers: default_max_readers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SqliteConfig = serde_json::from_str(r#"{ "busy_timeout": "250ms" }"#).unwrap();
        assert!(config.database_path.is_none());
        assert!(config.create_if_missing);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.max_readers, 8);
    }
}
