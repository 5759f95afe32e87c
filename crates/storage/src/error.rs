// SPDX-License-Identifier: MIT

//! Storage-layer error type. Converted into `ralph_core::CoreError::Store`
//! at the repo boundary so callers outside this crate only ever see the
//! shared error enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("migration {version} failed: {reason}")]
    Migration { version: i64, reason: String },

    #[error("{0}")]
    Invalid(String),
}

impl From<StorageError> for ralph_core::CoreError {
    fn from(err: StorageError) -> Self {
        ralph_core::CoreError::Store(err.to_string())
    }
}
