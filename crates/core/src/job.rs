// SPDX-License-Identifier: MIT

//! Job identifier, priority, status, and the state machine.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a job, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        JobId(value)
    }
}

/// Scheduling priority. Higher weight dequeues first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Dequeue weight: higher wins. Used only for comparisons/tests; the
    /// store expresses the same ordering directly in SQL.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Normal => 2,
            Priority::Low => 1,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            other => Err(CoreError::Validation(format!(
                "invalid priority '{other}', expected high, normal, or low"
            ))),
        }
    }
}

/// Lifecycle status of a job. Terminal variants are sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Queued,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Failed | Status::Cancelled)
    }

    /// Whether `self -> target` is a legal transition per the state machine.
    pub fn can_transition_to(&self, target: Status) -> bool {
        use Status::*;
        matches!(
            (self, target),
            (Queued, Running)
                | (Queued, Cancelled)
                | (Running, Paused)
                | (Running, Completed)
                | (Running, Failed)
                | (Running, Cancelled)
                | (Paused, Running)
                | (Paused, Cancelled)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Queued => "queued",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queued" => Ok(Status::Queued),
            "running" => Ok(Status::Running),
            "paused" => Ok(Status::Paused),
            "completed" => Ok(Status::Completed),
            "failed" => Ok(Status::Failed),
            "cancelled" => Ok(Status::Cancelled),
            other => Err(CoreError::Validation(format!("invalid status '{other}'"))),
        }
    }
}

/// Derive the result branch name: `"ralph/" + branch + "-result"`.
pub fn result_branch_name(branch: &str) -> String {
    format!("ralph/{branch}-result")
}

/// The central job entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: Status,
    pub priority: Priority,
    pub position: i64,
    pub repo_url: String,
    pub branch: String,
    pub result_branch: String,
    pub working_dir: Option<String>,
    pub prompt: String,
    pub max_iterations: u32,
    pub env: HashMap<String, String>,
    pub iteration: u32,
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub pr_url: Option<String>,
    pub error: Option<String>,
}

/// Fields accepted when constructing a brand-new job (before the queue
/// assigns `id` and `position` and forces `status = queued`).
#[derive(Debug, Clone)]
pub struct NewJob {
    pub repo_url: String,
    pub branch: String,
    pub working_dir: Option<String>,
    pub prompt: String,
    pub max_iterations: u32,
    pub priority: Priority,
    pub env: HashMap<String, String>,
}

impl Job {
    /// Build a job in `queued` status with a placeholder id/position; the
    /// queue fills both in on `enqueue`.
    pub fn from_new(new: NewJob, now: DateTime<Utc>) -> Self {
        let result_branch = result_branch_name(&new.branch);
        Job {
            id: JobId(0),
            status: Status::Queued,
            priority: new.priority,
            position: 0,
            repo_url: new.repo_url,
            branch: new.branch,
            result_branch,
            working_dir: new.working_dir,
            prompt: new.prompt,
            max_iterations: new.max_iterations,
            env: new.env,
            iteration: 0,
            retry_count: 0,
            created_at: now,
            started_at: None,
            paused_at: None,
            completed_at: None,
            pr_url: None,
            error: None,
        }
    }

    /// Validate the fields a caller controls directly (used by `enqueue`
    /// and by the transport before constructing a `NewJob`).
    pub fn validate_new(new: &NewJob) -> Result<(), CoreError> {
        if new.repo_url.trim().is_empty() {
            return Err(CoreError::Validation("repo_url must not be empty".into()));
        }
        if new.branch.trim().is_empty() {
            return Err(CoreError::Validation("branch must not be empty".into()));
        }
        if new.prompt.trim().is_empty() {
            return Err(CoreError::Validation("prompt must not be empty".into()));
        }
        if new.max_iterations == 0 {
            return Err(CoreError::Validation("max_iterations must be > 0".into()));
        }
        Ok(())
    }

    /// Apply a state transition, validating legality and setting the
    /// timestamp side effects described in the state machine. Does not
    /// persist; callers own that via the repo.
    pub fn transition(&mut self, target: Status, now: DateTime<Utc>) -> Result<(), CoreError> {
        if !self.status.can_transition_to(target) {
            return Err(CoreError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        if target == Status::Running && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if target == Status::Paused {
            self.paused_at = Some(now);
        }
        if target.is_terminal() {
            self.completed_at = Some(now);
        }
        self.status = target;
        Ok(())
    }

    /// Whether `iteration` has reached `max_iterations` — a terminal signal
    /// to the worker loop, not itself a status.
    pub fn iterations_exhausted(&self) -> bool {
        self.iteration >= self.max_iterations
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
