//! Storage layer for the sleep log.
//!
//! Persists [`SleepLog`] snapshots in a `SQLite` key-value table using
//! `rusqlite`. Each store name maps to one JSON document holding the persisted
//! fields (entries, timer timestamps, running flag and last edited entry).
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE snapshots (
//!     key TEXT PRIMARY KEY,
//!     value TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! `updated_at` is stored as ISO 8601 text (e.g. `2026-10-19T06:00:00.000Z`).
//! Snapshot values are opaque to this crate except through
//! [`Database::load_log`] and [`Database::save_log`].

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use sleeplog_core::SleepLog;
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored snapshot could not be decoded, or a log could not be encoded.
    #[error("invalid snapshot for {key}")]
    Snapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the raw snapshot stored under `key`, if any.
    pub fn read_snapshot(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous snapshot.
    pub fn write_snapshot(
        &self,
        key: &str,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO snapshots (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, format_timestamp(now)],
        )?;
        tracing::debug!(key, bytes = value.len(), "wrote snapshot");
        Ok(())
    }

    /// Removes the snapshot stored under `key`.
    ///
    /// Returns whether a snapshot existed.
    pub fn delete_snapshot(&self, key: &str) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM snapshots WHERE key = ?", [key])?;
        Ok(deleted > 0)
    }

    /// Restores the log stored under `key`.
    ///
    /// A missing snapshot yields an empty log.
    pub fn load_log(&self, key: &str) -> Result<SleepLog, DbError> {
        let Some(json) = self.read_snapshot(key)? else {
            tracing::debug!(key, "no snapshot, starting with an empty log");
            return Ok(SleepLog::new());
        };
        SleepLog::from_snapshot(&json).map_err(|source| DbError::Snapshot {
            key: key.to_string(),
            source,
        })
    }

    /// Writes `log` under `key`.
    pub fn save_log(&self, key: &str, log: &SleepLog, now: DateTime<Utc>) -> Result<(), DbError> {
        let json = log.to_snapshot().map_err(|source| DbError::Snapshot {
            key: key.to_string(),
            source,
        })?;
        self.write_snapshot(key, &json, now)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
