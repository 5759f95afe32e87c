// SPDX-License-Identifier: MIT

//! The priority queue: all mutating operations serialised by a single
//! `parking_lot::Mutex`, persisted through `ralph_storage::JobRepo`.

use chrono::Utc;
use parking_lot::Mutex;
use ralph_core::{CoreError, Job, JobId, NewJob, Status};
use ralph_storage::{JobRepo, Store};
use std::sync::Arc;

pub struct Queue {
    store: Arc<Store>,
    lock: Mutex<()>,
}

impl Queue {
    pub fn new(store: Arc<Store>) -> Self {
        Queue {
            store,
            lock: Mutex::new(()),
        }
    }

    fn repo(&self) -> JobRepo<'_> {
        JobRepo::new(&self.store)
    }

    /// Validate, force `status = queued`, assign the next `position`,
    /// persist, and fill in the assigned `id`.
    pub fn enqueue(&self, new: NewJob) -> Result<Job, CoreError> {
        Job::validate_new(&new)?;
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = Job::from_new(new, Utc::now());
        job.position = repo.max_queued_position()? + 1;
        job.id = repo.insert(&job)?;
        Ok(job)
    }

    /// The highest-priority queued job (ties by `position` ascending),
    /// transitioned to `running`. `None` if the queue is empty.
    pub fn dequeue(&self) -> Result<Option<Job>, CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut queued = repo.queued_ordered()?;
        let Some(mut job) = (!queued.is_empty()).then(|| queued.remove(0)) else {
            return Ok(None);
        };
        job.transition(Status::Running, Utc::now())?;
        repo.update(&job)?;
        Ok(Some(job))
    }

    pub fn pause(&self, id: JobId) -> Result<Job, CoreError> {
        self.transition(id, Status::Paused)
    }

    pub fn resume(&self, id: JobId) -> Result<Job, CoreError> {
        self.transition(id, Status::Running)
    }

    pub fn complete(&self, id: JobId) -> Result<Job, CoreError> {
        self.transition(id, Status::Completed)
    }

    pub fn cancel(&self, id: JobId) -> Result<Job, CoreError> {
        self.transition(id, Status::Cancelled)
    }

    pub fn fail(&self, id: JobId, message: impl Into<String>) -> Result<Job, CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = repo.get(id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        job.error = Some(message.into());
        job.transition(Status::Failed, Utc::now())?;
        repo.update(&job)?;
        Ok(job)
    }

    /// Set `pr_url` on a job without changing its status (called after a
    /// clean iteration run, before the scheduler transitions it terminal).
    pub fn record_pr_url(&self, id: JobId, pr_url: impl Into<String>) -> Result<(), CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = repo.get(id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        job.pr_url = Some(pr_url.into());
        repo.update(&job)?;
        Ok(())
    }

    /// Persist `iteration` and `retry_count` for an in-flight job.
    pub fn record_progress(&self, id: JobId, iteration: u32, retry_count: u32) -> Result<(), CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = repo.get(id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        job.iteration = iteration;
        job.retry_count = retry_count;
        repo.update(&job)?;
        Ok(())
    }

    /// Apply a `PATCH /api/jobs/{id}` edit: `priority` and/or
    /// `max_iterations`, neither of which changes `status`. Validates
    /// `max_iterations > 0` when present.
    pub fn patch(&self, id: JobId, priority: Option<ralph_core::Priority>, max_iterations: Option<u32>) -> Result<Job, CoreError> {
        if let Some(0) = max_iterations {
            return Err(CoreError::Validation("max_iterations must be > 0".into()));
        }
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = repo.get(id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if let Some(priority) = priority {
            job.priority = priority;
        }
        if let Some(max_iterations) = max_iterations {
            job.max_iterations = max_iterations;
        }
        repo.update(&job)?;
        Ok(job)
    }

    fn transition(&self, id: JobId, target: Status) -> Result<Job, CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let mut job = repo.get(id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        job.transition(target, Utc::now())?;
        repo.update(&job)?;
        Ok(job)
    }

    /// Rewrite `position` to `1..=n` for a permutation over currently
    /// queued jobs.
    pub fn reorder(&self, ids: &[JobId]) -> Result<(), CoreError> {
        let _guard = self.lock.lock();
        self.repo().reorder(ids)?;
        Ok(())
    }

    pub fn get(&self, id: JobId) -> Result<Job, CoreError> {
        self.repo()
            .get(id)?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Number of currently queued jobs.
    pub fn size(&self) -> Result<i64, CoreError> {
        let (_, total) = self.repo().list(Some(&[Status::Queued]), i64::MAX, 0)?;
        Ok(total)
    }

    pub fn get_running(&self) -> Result<Vec<Job>, CoreError> {
        let (jobs, _) = self.repo().list(Some(&[Status::Running]), i64::MAX, 0)?;
        Ok(jobs)
    }

    pub fn get_paused(&self) -> Result<Vec<Job>, CoreError> {
        let (jobs, _) = self.repo().list(Some(&[Status::Paused]), i64::MAX, 0)?;
        Ok(jobs)
    }

    /// List jobs for the transport layer: optional status filter, paged,
    /// `created_at DESC`.
    pub fn list(&self, statuses: Option<&[Status]>, limit: i64, offset: i64) -> Result<(Vec<Job>, i64), CoreError> {
        Ok(self.repo().list(statuses, limit, offset)?)
    }

    /// Sweep every job left `running` (e.g. after a crash) back to
    /// `queued`, preserving `iteration`/`retry_count`. Called once at
    /// startup.
    pub fn sweep_crashed_running_jobs(&self) -> Result<usize, CoreError> {
        let _guard = self.lock.lock();
        let repo = self.repo();
        let (running, _) = repo.list(Some(&[Status::Running]), i64::MAX, 0)?;
        let mut swept = 0;
        for mut job in running {
            job.status = Status::Queued;
            repo.update(&job)?;
            swept += 1;
        }
        Ok(swept)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
