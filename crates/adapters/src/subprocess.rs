// SPDX-License-Identifier: MIT

//! Subprocess execution helpers shared by the executor and git adapters.

use std::future::Future;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Run a subprocess command with a timeout. The child is killed if the
/// timeout elapses (via `tokio::process::Child`'s drop).
pub async fn run_with_timeout(mut cmd: Command, timeout: Duration, description: &str) -> Result<Output, String> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{description} failed: {io_err}")),
        Err(_elapsed) => Err(format!("{description} timed out after {}s", timeout.as_secs())),
    }
}

/// Retry `op` up to `max_retries` additional times on failure, sleeping
/// `backoff_ms * attempt` between tries (linear backoff).
pub async fn retry<T, E, F, Fut>(max_retries: u32, backoff_ms: u64, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(_) if attempt <= max_retries => {
                tokio::time::sleep(Duration::from_millis(backoff_ms * attempt as u64)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
