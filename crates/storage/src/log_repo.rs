// SPDX-License-Identifier: MIT

//! `job_logs` table access: an append-only log of iteration progress.

use crate::error::StorageError;
use crate::store::Store;
use chrono::{DateTime, Utc};
use ralph_core::JobId;

#[derive(Debug, Clone, PartialEq)]
pub struct JobLogEntry {
    pub id: i64,
    pub job_id: i64,
    pub iteration: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

pub struct LogRepo<'a> {
    store: &'a Store,
}

impl<'a> LogRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        LogRepo { store }
    }

    pub fn append(&self, job_id: JobId, iteration: u32, message: &str) -> Result<i64, StorageError> {
        self.store.with_conn(|conn| {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO job_logs (job_id, iteration, timestamp, message) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![job_id.0, iteration, now, message],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Entries for a job, oldest first; ties broken by insertion id.
    pub fn list(&self, job_id: JobId) -> Result<Vec<JobLogEntry>, StorageError> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, job_id, iteration, timestamp, message FROM job_logs
                 WHERE job_id = ?1 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt.query_map([job_id.0], |row| {
                let raw_ts: String = row.get(3)?;
                let timestamp = DateTime::parse_from_rfc3339(&raw_ts)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
                    })?;
                Ok(JobLogEntry {
                    id: row.get(0)?,
                    job_id: row.get(1)?,
                    iteration: row.get(2)?,
                    timestamp,
                    message: row.get(4)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }
}

#[cfg(test)]
#[path = "log_repo_tests.rs"]
mod tests;
