// SPDX-License-Identifier: MIT

//! The worker loop: a single long-lived task that dequeues jobs and drives
//! them through a pluggable [`JobHandler`].

use crate::queue::Queue;
use async_trait::async_trait;
use ralph_core::{Job, JobId, Status};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),
}

/// Executes one job to completion (or failure/pause/cancellation). The
/// default implementation lives in [`crate::handler::DefaultJobHandler`].
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, ctx: CancellationToken, job: Job) -> Result<(), HandlerError>;
}

pub struct Scheduler<H: JobHandler> {
    queue: Arc<Queue>,
    handler: Arc<H>,
    poll_interval: Duration,
    signal: Arc<Notify>,
    shutdown: CancellationToken,
}

impl<H: JobHandler> Scheduler<H> {
    pub fn new(queue: Arc<Queue>, handler: Arc<H>, poll_interval: Duration, shutdown: CancellationToken) -> Self {
        Scheduler {
            queue,
            handler,
            poll_interval,
            signal: Arc::new(Notify::new()),
            shutdown,
        }
    }

    /// A clone of the wake channel; callers invoke `notify_one()` after
    /// `enqueue` to avoid waiting for the next tick.
    pub fn signal_handle(&self) -> Arc<Notify> {
        self.signal.clone()
    }

    /// Run until `shutdown` fires. Attempts `process_next` once
    /// unconditionally, then loops over `{shutdown, signal, tick}`.
    pub async fn run(&self) {
        self.process_next().await;

        let mut tick = tokio::time::interval(self.poll_interval);
        // The first tick fires immediately; that's already covered above.
        tick.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("scheduler shutting down");
                    return;
                }
                _ = self.signal.notified() => {
                    self.process_next().await;
                }
                _ = tick.tick() => {
                    self.process_next().await;
                }
            }
        }
    }

    async fn process_next(&self) {
        let job = match self.queue.dequeue() {
            Ok(Some(job)) => job,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(error = %e, "failed to dequeue");
                return;
            }
        };

        let job_id = job.id;
        let child = self.shutdown.child_token();
        let outcome = self.handler.handle(child, job).await;
        self.finish(job_id, outcome);
        self.signal.notify_one();
    }

    fn finish(&self, job_id: JobId, outcome: Result<(), HandlerError>) {
        match outcome {
            Err(e) => {
                if let Err(fail_err) = self.queue.fail(job_id, e.to_string()) {
                    tracing::error!(error = %fail_err, "failed to persist job failure");
                }
            }
            Ok(()) => match self.queue.get(job_id) {
                Ok(current) if current.status == Status::Running => {
                    if let Err(complete_err) = self.queue.complete(job_id) {
                        tracing::error!(error = %complete_err, "failed to persist job completion");
                    }
                }
                // The handler itself already moved the job to paused/cancelled.
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "failed to reload job after handling"),
            },
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
