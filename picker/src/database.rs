//! SQLite key/value storage for usage history and preferences
//!
//! Single `key_values` table keyed by the strings the picker derives from
//! emoji identity and from the skin-tone slots.
//! Uses r2d2 connection pooling to allow concurrent reads without mutex blocking.

use crate::interface::KeyValueStore;
use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Thread-safe key/value store using connection pooling
///
/// Uses r2d2 connection pool for concurrent read access.
/// WAL mode enables readers to proceed without blocking each other.
pub struct SqliteKeyValueStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteKeyValueStore {
    /// Open or create a database at the given path with connection pooling
    pub fn open<P: AsRef<Path>>(path: P) -> DatabaseResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| {
                conn.execute_batch("
                    PRAGMA journal_mode=WAL;
                    PRAGMA synchronous=NORMAL;
                ")?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .build(manager)?;

        let db = Self { pool };
        db.setup_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> DatabaseResult<Self> {
        let manager = SqliteConnectionManager::memory();

        // In-memory needs single connection to maintain state
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)?;

        let db = Self { pool };
        db.setup_schema()?;
        Ok(db)
    }

    /// Get a connection from the pool
    fn get_conn(&self) -> DatabaseResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    fn setup_schema(&self) -> DatabaseResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updatedAt TEXT NOT NULL
            );
        "#)?;
        Ok(())
    }

    /// Get the database size in bytes
    pub fn database_size(&self) -> DatabaseResult<i64> {
        let conn = self.get_conn()?;
        let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
        let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;
        Ok(page_count * page_size)
    }

    /// Number of stored keys
    pub fn count_values(&self) -> DatabaseResult<u64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM key_values", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn get_value(&self, key: &str) -> DatabaseResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM key_values WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value under `key`
    pub fn set_value(&self, key: &str, value: &str) -> DatabaseResult<()> {
        let conn = self.get_conn()?;
        let updated_at = Utc::now().format("%Y-%m-%d %H:%M:%S%.f").to_string();
        conn.execute(
            r#"INSERT INTO key_values (key, value, updatedAt) VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updatedAt = excluded.updatedAt"#,
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    /// Delete `key`. Returns whether a row was removed.
    pub fn remove_value(&self, key: &str) -> DatabaseResult<bool> {
        let conn = self.get_conn()?;
        let deleted = conn.execute("DELETE FROM key_values WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: String) -> Option<String> {
        self.get_value(&key).unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "key/value read failed");
            None
        })
    }

    fn set(&self, key: String, value: String) {
        if let Err(e) = self.set_value(&key, &value) {
            tracing::warn!(key = %key, error = %e, "key/value write failed");
        }
    }

    fn remove(&self, key: String) {
        if let Err(e) = self.remove_value(&key) {
            tracing::warn!(key = %key, error = %e, "key/value delete failed");
        }
    }
}
