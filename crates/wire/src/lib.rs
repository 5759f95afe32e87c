// SPDX-License-Identifier: MIT

//! ralph-wire: JSON request/response DTOs shared between `ralphd` and
//! `ralph`. Keeping these separate from both binaries means neither has to
//! depend on the other's internals to speak the wire protocol.

use chrono::{DateTime, Utc};
use ralph_core::{Job, Priority};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `POST /api/jobs` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub repo_url: String,
    pub branch: String,
    pub prompt: String,
    pub max_iterations: u32,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub env: Option<HashMap<String, String>>,
}

/// `PATCH /api/jobs/{id}` request body. Both fields are optional; an
/// absent field leaves the current value untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatchJobRequest {
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub max_iterations: Option<u32>,
}

/// `GET /api/jobs` query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JobListQuery {
    /// Comma-separated list of statuses, e.g. `"queued,running"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// `GET /api/jobs` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

/// `PUT /api/jobs/order` request body: a full permutation over currently
/// queued job ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub job_ids: Vec<i64>,
}

/// A single job log entry as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryDto {
    pub id: i64,
    pub job_id: i64,
    pub iteration: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// `GET /api/jobs/{id}/logs` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntryDto>,
}

/// `GET /health` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        HealthResponse { status: "ok" }
    }
}

/// The uniform error envelope: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}
