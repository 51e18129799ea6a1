#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pousada crates.
//! [pousada_core]: https://docs.rs/pousada_core/latest/pousada_core/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::str::FromStr;
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// SQLite implementation of the booking store.
///
/// Holds separate reader and writer connection pools to one database. The
/// writer pool has a single connection, so writes are serialized and every
/// conditional update observes the result of the previous one.
///
/// # Example
///
/// ```no_run
/// # use pousada_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open the database described by `config`, applying any pending
    /// migrations before returning.
    ///
    /// The connection runs in WAL mode with normal synchronization, which
    /// lets readers proceed while the writer commits.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or a
    /// migration fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(config.busy_timeout)
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new()
            .max_connections(config.max_readers.max(1))
            .connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::event!(
            tracing::Level::INFO,
            path = db_path.as_deref().unwrap_or(":memory:"),
            "booking database ready"
        );

        Ok(Self { reader, writer })
    }

    /// Close both connection pools.
    ///
    /// Any later call on the store fails with [`sqlx::Error::PoolClosed`].
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
    }
}
