// SPDX-License-Identifier: MIT

//! The executor adapter: runs one iteration of the configured agent binary
//! against a job and reports whether it signalled completion.

use crate::subprocess::{retry, run_with_timeout};
use async_trait::async_trait;
use ralph_core::Job;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
    #[error("cancelled")]
    Cancelled,
}

/// Result of running one iteration against the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationOutcome {
    pub completed: bool,
    pub summary: String,
}

#[async_trait]
pub trait ExecutorAdapter: Send + Sync + 'static {
    async fn run_iteration(
        &self,
        ctx: &CancellationToken,
        job: &Job,
        iteration: u32,
    ) -> Result<IterationOutcome, ExecutorError>;
}

/// Spawns the configured agent binary with the job's prompt and env,
/// treating a trimmed stdout line matching `completion_sentinel` as
/// `completed = true`. Retries transient spawn failures with linear backoff.
pub struct SubprocessExecutorAdapter {
    pub agent_command: String,
    pub completion_sentinel: String,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub timeout: Duration,
}

impl SubprocessExecutorAdapter {
    pub fn new(agent_command: impl Into<String>) -> Self {
        SubprocessExecutorAdapter {
            agent_command: agent_command.into(),
            completion_sentinel: "RALPH_DONE".into(),
            max_retries: 3,
            retry_backoff_ms: 500,
            timeout: Duration::from_secs(600),
        }
    }

    async fn spawn_once(&self, job: &Job, iteration: u32) -> Result<IterationOutcome, ExecutorError> {
        let mut cmd = Command::new(&self.agent_command);
        cmd.arg(&job.prompt);
        for (key, value) in &job.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &job.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = run_with_timeout(cmd, self.timeout, "agent iteration")
            .await
            .map_err(ExecutorError::SpawnFailed)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let completed = stdout
            .lines()
            .any(|line| line.trim() == self.completion_sentinel);

        if !output.status.success() && !completed {
            return Err(ExecutorError::ExecutionFailed(format!(
                "iteration {iteration} exited with {:?}",
                output.status.code()
            )));
        }

        Ok(IterationOutcome {
            completed,
            summary: stdout.trim().to_string(),
        })
    }
}

#[async_trait]
impl ExecutorAdapter for SubprocessExecutorAdapter {
    async fn run_iteration(
        &self,
        ctx: &CancellationToken,
        job: &Job,
        iteration: u32,
    ) -> Result<IterationOutcome, ExecutorError> {
        if ctx.is_cancelled() {
            return Err(ExecutorError::Cancelled);
        }
        retry(self.max_retries, self.retry_backoff_ms, || async {
            if ctx.is_cancelled() {
                return Err(ExecutorError::Cancelled);
            }
            self.spawn_once(job, iteration).await
        })
        .await
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecutorCall, FakeExecutorAdapter};

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
