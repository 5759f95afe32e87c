// SPDX-License-Identifier: MIT

//! The default [`JobHandler`]: the per-iteration loop that drives the
//! executor adapter, appends log entries, and on a clean run pushes the
//! result branch and opens a pull request.

use crate::queue::Queue;
use crate::scheduler::{HandlerError, JobHandler};
use async_trait::async_trait;
use ralph_adapters::{ExecutorAdapter, GitOps};
use ralph_core::Job;
use ralph_storage::{LogRepo, Store};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drives one job through its iteration loop. Owns no state of its own;
/// everything it touches is a shared collaborator.
pub struct DefaultJobHandler<E: ExecutorAdapter, G: GitOps> {
    queue: Arc<Queue>,
    store: Arc<Store>,
    executor: Arc<E>,
    git: Arc<G>,
    workspace_root: PathBuf,
}

impl<E: ExecutorAdapter, G: GitOps> DefaultJobHandler<E, G> {
    pub fn new(queue: Arc<Queue>, store: Arc<Store>, executor: Arc<E>, git: Arc<G>, workspace_root: impl Into<PathBuf>) -> Self {
        DefaultJobHandler {
            queue,
            store,
            executor,
            git,
            workspace_root: workspace_root.into(),
        }
    }

    fn workspace_dir(&self, job: &Job) -> PathBuf {
        self.workspace_root.join(format!("job-{}", job.id))
    }

    fn log_repo(&self) -> LogRepo<'_> {
        LogRepo::new(&self.store)
    }
}

#[async_trait]
impl<E: ExecutorAdapter, G: GitOps> JobHandler for DefaultJobHandler<E, G> {
    async fn handle(&self, ctx: CancellationToken, job: Job) -> Result<(), HandlerError> {
        let dir = self.workspace_dir(&job);
        if dir.exists() {
            tokio::fs::remove_dir_all(&dir)
                .await
                .map_err(|e| HandlerError::Failed(format!("clearing workspace: {e}")))?;
        }
        self.git
            .clone(&job.repo_url, &dir)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;
        self.git
            .create_branch(&dir, &job.result_branch)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;

        let mut completed = false;
        for iteration in 1..=job.max_iterations {
            if ctx.is_cancelled() {
                tracing::info!(job_id = %job.id, "iteration loop cancelled");
                return Ok(());
            }

            self.queue
                .record_progress(job.id, iteration, job.retry_count)
                .map_err(|e| HandlerError::Failed(e.to_string()))?;

            let mut iteration_job = job.clone();
            iteration_job.working_dir = Some(
                iteration_job
                    .working_dir
                    .map(|sub| dir.join(sub).display().to_string())
                    .unwrap_or_else(|| dir.display().to_string()),
            );

            let outcome = self
                .executor
                .run_iteration(&ctx, &iteration_job, iteration)
                .await
                .map_err(|e| HandlerError::Failed(e.to_string()))?;

            self.log_repo()
                .append(job.id, iteration, &outcome.summary)
                .map_err(|e| HandlerError::Failed(e.to_string()))?;

            tracing::info!(job_id = %job.id, iteration, completed = outcome.completed, "iteration finished");

            if outcome.completed {
                completed = true;
                break;
            }
        }

        if !completed {
            tracing::info!(job_id = %job.id, "reached max_iterations without a completion signal");
        }

        self.git
            .commit_all(&dir, &format!("ralph: {}", job.prompt))
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;
        self.git
            .push(&dir, &job.result_branch)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;
        let pr_url = self
            .git
            .open_pull_request(&dir, &job.result_branch, &job.prompt)
            .await
            .map_err(|e| HandlerError::Failed(e.to_string()))?;

        self.queue
            .record_pr_url(job.id, pr_url)
            .map_err(|e| HandlerError::Failed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
