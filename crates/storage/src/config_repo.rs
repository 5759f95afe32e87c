// SPDX-License-Identifier: MIT

//! `config` table access: a flat `(key, value)` table that together decode
//! into a typed [`ServerConfig`]. Per §4.4: defaults are overlaid with
//! whatever rows are present, unknown keys are skipped, and the two model
//! keys fall back to a bare-string `name` if the stored value isn't JSON.

use crate::error::StorageError;
use crate::store::Store;
use chrono::Utc;
use ralph_core::{CoreError, ServerConfig};
use serde_json::Value;

const KEYS: &[&str] = &[
    "ollama",
    "large_model",
    "small_model",
    "default_max_iterations",
    "concurrent_jobs",
    "workspace_dir",
    "job_retention_days",
    "max_claude_retries",
    "max_git_retries",
    "git_retry_backoff_ms",
];

pub struct ConfigRepo<'a> {
    store: &'a Store,
}

impl<'a> ConfigRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        ConfigRepo { store }
    }

    /// The full config: defaults overlaid with whatever rows are present.
    pub fn get(&self) -> Result<ServerConfig, StorageError> {
        let mut value = serde_json::to_value(ServerConfig::default())?;
        let rows: Vec<(String, String)> = self.store.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM config")?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })?;

        for (key, raw) in rows {
            apply_row(&mut value, &key, &raw);
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Merge `patch` into the current config with field-presence detection,
    /// revalidate, and persist the result atomically.
    pub fn apply_patch(&self, patch: &Value) -> Result<ServerConfig, StorageError> {
        let current = self.get()?;
        let updated = current
            .apply_patch(patch)
            .map_err(|e| StorageError::Invalid(core_error_message(e)))?;
        self.set_all(&updated)?;
        Ok(updated)
    }

    /// Persist every key of `cfg`, upserting all rows in one transaction.
    pub fn set_all(&self, cfg: &ServerConfig) -> Result<(), StorageError> {
        let encoded = encode(cfg)?;
        self.store.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let now = Utc::now().to_rfc3339();
            for (key, value) in &encoded {
                tx.execute(
                    "INSERT INTO config (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![key, value, now],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

fn core_error_message(e: CoreError) -> String {
    e.to_string()
}

fn apply_row(value: &mut Value, key: &str, raw: &str) {
    if !KEYS.contains(&key) {
        tracing::warn!(key, "skipping unknown config key");
        return;
    }

    match key {
        "large_model" | "small_model" => {
            let parsed = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| {
                let mut placement = value[key].clone();
                placement["name"] = Value::String(raw.to_string());
                placement
            });
            value[key] = parsed;
        }
        "ollama" => {
            if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
                value[key] = parsed;
            }
        }
        "default_max_iterations" | "concurrent_jobs" | "job_retention_days" | "max_claude_retries"
        | "max_git_retries" | "git_retry_backoff_ms" => {
            if let Ok(n) = raw.parse::<u64>() {
                value[key] = Value::from(n);
            }
        }
        "workspace_dir" => {
            value[key] = Value::String(raw.to_string());
        }
        _ => unreachable!("key already checked against KEYS"),
    }
}

fn encode(cfg: &ServerConfig) -> Result<Vec<(&'static str, String)>, StorageError> {
    Ok(vec![
        ("ollama", serde_json::to_string(&cfg.ollama)?),
        ("large_model", serde_json::to_string(&cfg.large_model)?),
        ("small_model", serde_json::to_string(&cfg.small_model)?),
        ("default_max_iterations", cfg.default_max_iterations.to_string()),
        ("concurrent_jobs", cfg.concurrent_jobs.to_string()),
        ("workspace_dir", cfg.workspace_dir.clone()),
        ("job_retention_days", cfg.job_retention_days.to_string()),
        ("max_claude_retries", cfg.max_claude_retries.to_string()),
        ("max_git_retries", cfg.max_git_retries.to_string()),
        ("git_retry_backoff_ms", cfg.git_retry_backoff_ms.to_string()),
    ])
}

#[cfg(test)]
#[path = "config_repo_tests.rs"]
mod tests;
