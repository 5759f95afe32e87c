// SPDX-License-Identifier: MIT

//! The single SQLite-backed store: connection lifecycle, pragmas, and
//! migration application. Everything else (`job_repo`, `log_repo`,
//! `config_repo`) borrows the connection through [`Store::with_conn`].

use crate::error::StorageError;
use parking_lot::Mutex;
use rusqlite::Connection;

/// Numbered migration scripts, applied in order. Add new entries here;
/// never edit an already-shipped one.
const MIGRATIONS: &[(i64, &str, &str)] =
    &[(1, "001_init", include_str!("migrations/001_init.sql"))];

/// Owns the one `rusqlite::Connection` repos are built on top of. Mutex
/// matches this codebase's convention for guarding shared mutable state.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (creating if absent) the SQLite file at `path`, apply pragmas,
    /// and run any migrations not yet recorded.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::configure(&conn, path != ":memory:")?;
        let store = Store {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open a private in-memory database. Used by tests; WAL is skipped
    /// since it has no meaning for `:memory:`.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn, false)?;
        let store = Store {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn configure(conn: &Connection, enable_wal: bool) -> Result<(), StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if enable_wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        Ok(())
    }

    fn migrate(&self) -> Result<(), StorageError> {
        let mut conn = self.conn.lock();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL);",
        )?;
        for &(version, name, sql) in MIGRATIONS {
            let already: i64 = conn.query_row(
                "SELECT COUNT(*) FROM migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )?;
            if already > 0 {
                continue;
            }
            let tx = conn.transaction()?;
            tx.execute_batch(sql).map_err(|e| StorageError::Migration {
                version,
                reason: format!("{name}: {e}"),
            })?;
            tx.execute(
                "INSERT INTO migrations (version, applied_at) VALUES (?1, datetime('now'))",
                [version],
            )?;
            tx.commit()?;
        }
        Ok(())
    }

    /// Run `f` with exclusive access to the underlying connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T, StorageError>) -> Result<T, StorageError> {
        let conn = self.conn.lock();
        f(&conn)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
