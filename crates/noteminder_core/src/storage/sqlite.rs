//! SQLite-backed blob store.
//!
//! # Responsibility
//! - Open and configure SQLite connections for NoteMinder core.
//! - Apply the key/value schema migration before any data access.
//! - Implement the [`BlobStore`] contract over one `blobs` table.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Returned stores have `foreign_keys=ON` and migrations fully applied.
//! - A database written by a newer schema version is rejected, not guessed
//!   at.

use super::{BlobStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "CREATE TABLE IF NOT EXISTS blobs (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
    );",
}];

fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// SQLite-backed [`BlobStore`].
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (creating if needed) a database file and applies migrations.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::bootstrap(Connection::open(path)?, "file")
    }

    /// Opens an in-memory database; used by tests and throwaway sessions.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?, "memory")
    }

    fn bootstrap(mut conn: Connection, mode: &str) -> StorageResult<Self> {
        let started_at = Instant::now();
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        match apply_migrations(&mut conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=storage status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=db_open module=storage status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl BlobStore for SqliteBlobStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SqliteBlobStore;
    use crate::storage::BlobStore;

    #[test]
    fn missing_key_loads_as_none() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.load("absent").unwrap(), None);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("second"));
    }
}
