// SPDX-License-Identifier: MIT

//! `jobs` table access. Collects identifiers into memory before issuing
//! secondary per-row queries, per the single-connection contract.

use crate::error::StorageError;
use crate::store::Store;
use chrono::{DateTime, Utc};
use ralph_core::{Job, JobId, Status};
use rusqlite::{params, Row};
use std::collections::HashMap;
use std::str::FromStr;

pub struct JobRepo<'a> {
    store: &'a Store,
}

impl<'a> JobRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        JobRepo { store }
    }

    /// Insert a new job row, assigning `id` from the database. The caller
    /// has already forced `status = queued` and computed `position`.
    pub fn insert(&self, job: &Job) -> Result<JobId, StorageError> {
        self.store.with_conn(|conn| {
            conn.execute(
                "INSERT INTO jobs (
                    status, priority, position, repo_url, branch, result_branch,
                    working_dir, prompt, max_iterations, env, iteration, retry_count,
                    created_at, started_at, paused_at, completed_at, pr_url, error
                ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18)",
                params![
                    job.status.to_string(),
                    job.priority.to_string(),
                    job.position,
                    job.repo_url,
                    job.branch,
                    job.result_branch,
                    job.working_dir,
                    job.prompt,
                    job.max_iterations,
                    serde_json::to_string(&job.env)?,
                    job.iteration,
                    job.retry_count,
                    job.created_at.to_rfc3339(),
                    job.started_at.map(|t| t.to_rfc3339()),
                    job.paused_at.map(|t| t.to_rfc3339()),
                    job.completed_at.map(|t| t.to_rfc3339()),
                    job.pr_url,
                    job.error,
                ],
            )?;
            Ok(JobId(conn.last_insert_rowid()))
        })
    }

    /// Overwrite every mutable field of an existing job by id.
    pub fn update(&self, job: &Job) -> Result<(), StorageError> {
        self.store.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE jobs SET
                    status=?1, priority=?2, position=?3, working_dir=?4, prompt=?5,
                    max_iterations=?6, env=?7, iteration=?8, retry_count=?9,
                    started_at=?10, paused_at=?11, completed_at=?12, pr_url=?13, error=?14
                WHERE id=?15",
                params![
                    job.status.to_string(),
                    job.priority.to_string(),
                    job.position,
                    job.working_dir,
                    job.prompt,
                    job.max_iterations,
                    serde_json::to_string(&job.env)?,
                    job.iteration,
                    job.retry_count,
                    job.started_at.map(|t| t.to_rfc3339()),
                    job.paused_at.map(|t| t.to_rfc3339()),
                    job.completed_at.map(|t| t.to_rfc3339()),
                    job.pr_url,
                    job.error,
                    job.id.0,
                ],
            )?;
            if changed == 0 {
                return Err(StorageError::Invalid(format!("job {} does not exist", job.id)));
            }
            Ok(())
        })
    }

    pub fn get(&self, id: JobId) -> Result<Option<Job>, StorageError> {
        self.store.with_conn(|conn| {
            conn.query_row("SELECT * FROM jobs WHERE id = ?1", [id.0], |row| row_to_job(row))
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other.into()),
                })
        })
    }

    pub fn delete(&self, id: JobId) -> Result<bool, StorageError> {
        self.store
            .with_conn(|conn| Ok(conn.execute("DELETE FROM jobs WHERE id = ?1", [id.0])? > 0))
    }

    /// Every queued job ordered exactly as `dequeue` would consume it:
    /// priority (high, normal, low), then position ascending.
    pub fn queued_ordered(&self) -> Result<Vec<Job>, StorageError> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM jobs WHERE status = 'queued' ORDER BY
                    CASE priority WHEN 'high' THEN 0 WHEN 'normal' THEN 1 ELSE 2 END ASC,
                    position ASC",
            )?;
            let rows = stmt.query_map([], row_to_job)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn max_queued_position(&self) -> Result<i64, StorageError> {
        self.store.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COALESCE(MAX(position), 0) FROM jobs WHERE status = 'queued'",
                [],
                |row| row.get(0),
            )?)
        })
    }

    /// Rewrite `position` to `1..=n` for the given permutation of currently
    /// queued job ids, as one transaction.
    pub fn reorder(&self, ids: &[JobId]) -> Result<(), StorageError> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM jobs WHERE status = 'queued'")?;
            let current: Vec<i64> = stmt
                .query_map([], |row| row.get::<_, i64>(0))?
                .collect::<Result<_, _>>()?;
            drop(stmt);

            let given: Vec<i64> = ids.iter().map(|id| id.0).collect();
            let mut sorted_current = current.clone();
            sorted_current.sort_unstable();
            let mut sorted_given = given.clone();
            sorted_given.sort_unstable();
            if sorted_current != sorted_given {
                return Err(StorageError::Invalid(
                    "reorder ids must be exactly the set of currently queued jobs".into(),
                ));
            }

            let tx = conn.unchecked_transaction()?;
            for (index, id) in given.iter().enumerate() {
                tx.execute(
                    "UPDATE jobs SET position = ?1 WHERE id = ?2",
                    params![(index as i64) + 1, id],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    /// List jobs, optionally filtered by status, ordered `created_at DESC`,
    /// returning both the page and the total matching count.
    pub fn list(
        &self,
        statuses: Option<&[Status]>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Job>, i64), StorageError> {
        self.store.with_conn(|conn| {
            let (clause, status_strings) = match statuses {
                Some(list) if !list.is_empty() => {
                    let placeholders = list.iter().map(|_| "?").collect::<Vec<_>>().join(",");
                    (
                        format!("WHERE status IN ({placeholders})"),
                        list.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                    )
                }
                _ => (String::new(), Vec::new()),
            };

            let total: i64 = {
                let sql = format!("SELECT COUNT(*) FROM jobs {clause}");
                let params: Vec<&dyn rusqlite::ToSql> =
                    status_strings.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
                conn.query_row(&sql, params.as_slice(), |row| row.get(0))?
            };

            let sql = format!("SELECT * FROM jobs {clause} ORDER BY created_at DESC LIMIT ? OFFSET ?");
            let mut stmt = conn.prepare(&sql)?;
            let mut params: Vec<&dyn rusqlite::ToSql> =
                status_strings.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
            params.push(&limit);
            params.push(&offset);
            let jobs = stmt
                .query_map(params.as_slice(), row_to_job)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok((jobs, total))
        })
    }
}

fn row_to_job(row: &Row<'_>) -> rusqlite::Result<Job> {
    let env_json: String = row.get("env")?;
    let env: HashMap<String, String> = serde_json::from_str(&env_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Job {
        id: JobId(row.get("id")?),
        status: parse_col(row, "status")?,
        priority: parse_col(row, "priority")?,
        position: row.get("position")?,
        repo_url: row.get("repo_url")?,
        branch: row.get("branch")?,
        result_branch: row.get("result_branch")?,
        working_dir: row.get("working_dir")?,
        prompt: row.get("prompt")?,
        max_iterations: row.get("max_iterations")?,
        env,
        iteration: row.get("iteration")?,
        retry_count: row.get("retry_count")?,
        created_at: parse_timestamp(row, "created_at")?,
        started_at: parse_opt_timestamp(row, "started_at")?,
        paused_at: parse_opt_timestamp(row, "paused_at")?,
        completed_at: parse_opt_timestamp(row, "completed_at")?,
        pr_url: row.get("pr_url")?,
        error: row.get("error")?,
    })
}

fn parse_col<T: FromStr>(row: &Row<'_>, col: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    T::from_str(&raw).map_err(|_| {
        rusqlite::Error::InvalidColumnType(0, col.to_string(), rusqlite::types::Type::Text)
    })
}

fn parse_timestamp(row: &Row<'_>, col: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
}

fn parse_opt_timestamp(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    })
    .transpose()
}

#[cfg(test)]
#[path = "job_repo_tests.rs"]
mod tests;
