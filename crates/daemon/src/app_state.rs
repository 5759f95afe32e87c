// SPDX-License-Identifier: MIT

//! Shared state injected into every axum handler.

use ralph_engine::Scheduler;
use ralph_storage::Store;
use std::sync::Arc;
use tokio::sync::Notify;

use ralph_engine::{JobHandler, Queue};

#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<Queue>,
    pub store: Arc<Store>,
    pub signal: Arc<Notify>,
}

impl AppState {
    pub fn new<H: JobHandler>(queue: Arc<Queue>, store: Arc<Store>, scheduler: &Scheduler<H>) -> Self {
        AppState {
            queue,
            store,
            signal: scheduler.signal_handle(),
        }
    }
}
