// SPDX-License-Identifier: MIT

//! ralph daemon (ralphd): accepts jobs over HTTP, runs the worker loop, and
//! persists everything to a single SQLite file.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use ralph_adapters::{SubprocessExecutorAdapter, SubprocessGitOps};
use ralph_daemon::{env, AppState};
use ralph_engine::{DefaultJobHandler, Queue, Scheduler};
use ralph_storage::{ConfigRepo, Store};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = env::db_path();
    let store = Arc::new(Store::open(&db_path)?);
    let queue = Arc::new(Queue::new(store.clone()));

    let swept = queue.sweep_crashed_running_jobs()?;
    if swept > 0 {
        tracing::warn!(count = swept, "requeued jobs left running from a previous startup");
    }

    let config = ConfigRepo::new(&store).get()?;
    if config.concurrent_jobs > 1 {
        tracing::warn!(
            concurrent_jobs = config.concurrent_jobs,
            "concurrent_jobs > 1 is accepted but unimplemented; jobs still run one at a time"
        );
    }
    let shutdown = CancellationToken::new();

    let mut executor_adapter = SubprocessExecutorAdapter::new("claude");
    executor_adapter.max_retries = config.max_claude_retries;
    executor_adapter.retry_backoff_ms = config.git_retry_backoff_ms;
    let executor = Arc::new(executor_adapter);
    let git = Arc::new(SubprocessGitOps::new(config.max_git_retries, config.git_retry_backoff_ms));
    let handler = Arc::new(DefaultJobHandler::new(queue.clone(), store.clone(), executor, git, config.workspace_dir));

    let scheduler = Arc::new(Scheduler::new(queue.clone(), handler, Duration::from_secs(5), shutdown.clone()));
    let state = AppState::new(queue, store, scheduler.as_ref());
    let app = ralph_daemon::build(state);

    let scheduler_task = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run().await })
    };

    let addr = env::resolve_listen_addr(&env::addr());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "ralphd listening");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("received SIGTERM"),
                _ = sigint.recv() => tracing::info!("received SIGINT"),
            }
            shutdown.cancel();
        }
    });

    server.await?;
    scheduler_task.await?;
    tracing::info!("ralphd stopped");
    Ok(())
}
