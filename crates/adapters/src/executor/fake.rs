// SPDX-License-Identifier: MIT

//! Deterministic executor adapter for tests.

use super::{ExecutorAdapter, ExecutorError, IterationOutcome};
use async_trait::async_trait;
use parking_lot::Mutex;
use ralph_core::Job;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct ExecutorCall {
    pub job_id: i64,
    pub iteration: u32,
}

#[derive(Default)]
struct FakeState {
    outcomes: VecDeque<Result<IterationOutcome, ExecutorError>>,
    calls: Vec<ExecutorCall>,
}

#[derive(Clone, Default)]
pub struct FakeExecutorAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeExecutorAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next `run_iteration` call.
    pub fn push_outcome(&self, outcome: Result<IterationOutcome, ExecutorError>) {
        self.inner.lock().outcomes.push_back(outcome);
    }

    pub fn push_completed(&self, summary: impl Into<String>) {
        self.push_outcome(Ok(IterationOutcome {
            completed: true,
            summary: summary.into(),
        }));
    }

    pub fn push_continue(&self, summary: impl Into<String>) {
        self.push_outcome(Ok(IterationOutcome {
            completed: false,
            summary: summary.into(),
        }));
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl ExecutorAdapter for FakeExecutorAdapter {
    async fn run_iteration(
        &self,
        _ctx: &CancellationToken,
        job: &Job,
        iteration: u32,
    ) -> Result<IterationOutcome, ExecutorError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ExecutorCall {
            job_id: job.id.0,
            iteration,
        });
        inner.outcomes.pop_front().unwrap_or(Ok(IterationOutcome {
            completed: true,
            summary: "fake adapter: no outcome queued, defaulting to completed".into(),
        }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
