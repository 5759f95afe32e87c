// SPDX-License-Identifier: MIT

//! Route assembly: the `/api/*` surface plus `/health`.

use crate::app_state::AppState;
use crate::routes::{config, health, jobs};
use axum::routing::{get, patch, post, put};
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/jobs", post(jobs::create).get(jobs::list))
        .route("/api/jobs/order", put(jobs::reorder))
        .route("/api/jobs/:id", get(jobs::get).delete(jobs::cancel).patch(jobs::patch))
        .route("/api/jobs/:id/pause", post(jobs::pause))
        .route("/api/jobs/:id/resume", post(jobs::resume))
        .route("/api/jobs/:id/logs", get(jobs::logs))
        .route("/api/config", get(config::get).patch(config::patch))
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
