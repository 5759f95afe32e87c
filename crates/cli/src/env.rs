// SPDX-License-Identifier: MIT

//! Centralized environment variable access for the CLI crate.

use std::time::Duration;

/// Server URL override, takes priority over the YAML config file.
pub fn server_url() -> Option<String> {
    std::env::var("RALPH_SERVER_URL").ok().filter(|s| !s.is_empty())
}

/// Request timeout, `RALPH_TIMEOUT_MS` (default 30s).
pub fn timeout() -> Duration {
    parse_timeout_ms(std::env::var("RALPH_TIMEOUT_MS").ok().as_deref())
}

fn parse_timeout_ms(raw: Option<&str>) -> Duration {
    raw.and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
