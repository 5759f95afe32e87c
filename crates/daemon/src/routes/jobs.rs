// SPDX-License-Identifier: MIT

//! `/api/jobs` routes: create, list, inspect, cancel, patch, pause, resume,
//! reorder, and the per-job log stream.

use crate::app_state::AppState;
use crate::error::ApiError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ralph_core::{Job, JobId, NewJob, Status};
use ralph_storage::LogRepo;
use ralph_wire::{
    CreateJobRequest, JobListQuery, JobListResponse, LogEntryDto, LogsResponse, PatchJobRequest, ReorderRequest,
};
use std::str::FromStr;

pub async fn create(State(state): State<AppState>, Json(req): Json<CreateJobRequest>) -> Result<(StatusCode, Json<Job>), ApiError> {
    let priority = match req.priority {
        Some(raw) => ralph_core::Priority::from_str(&raw)?,
        None => ralph_core::Priority::Normal,
    };
    let new = NewJob {
        repo_url: req.repo_url,
        branch: req.branch,
        working_dir: req.working_dir,
        prompt: req.prompt,
        max_iterations: req.max_iterations,
        priority,
        env: req.env.unwrap_or_default(),
    };
    let job = state.queue.enqueue(new)?;
    state.signal.notify_one();
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list(State(state): State<AppState>, Query(query): Query<JobListQuery>) -> Result<Json<JobListResponse>, ApiError> {
    let statuses = match &query.status {
        Some(raw) => Some(
            raw.split(',')
                .map(|s| Status::from_str(s.trim()))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);
    let (jobs, total) = state
        .queue
        .list(statuses.as_deref(), limit as i64, offset as i64)?;
    Ok(Json(JobListResponse {
        jobs,
        total: total as u32,
        limit,
        offset,
    }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Job>, ApiError> {
    Ok(Json(state.queue.get(JobId(id))?))
}

pub async fn cancel(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Job>, ApiError> {
    Ok(Json(state.queue.cancel(JobId(id))?))
}

pub async fn patch(State(state): State<AppState>, Path(id): Path<i64>, Json(req): Json<PatchJobRequest>) -> Result<Json<Job>, ApiError> {
    let job = state.queue.patch(JobId(id), req.priority, req.max_iterations)?;
    Ok(Json(job))
}

pub async fn pause(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Job>, ApiError> {
    Ok(Json(state.queue.pause(JobId(id))?))
}

pub async fn resume(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Job>, ApiError> {
    let job = state.queue.resume(JobId(id))?;
    state.signal.notify_one();
    Ok(Json(job))
}

pub async fn reorder(State(state): State<AppState>, Json(req): Json<ReorderRequest>) -> Result<StatusCode, ApiError> {
    let ids: Vec<JobId> = req.job_ids.into_iter().map(JobId).collect();
    state.queue.reorder(&ids)?;
    Ok(StatusCode::OK)
}

pub async fn logs(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<LogsResponse>, ApiError> {
    let id = JobId(id);
    // Confirm the job exists so a bad id reports 404 rather than an empty list.
    state.queue.get(id)?;
    let entries = LogRepo::new(&state.store).list(id)?;
    let logs = entries
        .into_iter()
        .map(|e| LogEntryDto {
            id: e.id,
            job_id: e.job_id,
            iteration: e.iteration,
            timestamp: e.timestamp,
            message: e.message,
        })
        .collect();
    Ok(Json(LogsResponse { logs }))
}
