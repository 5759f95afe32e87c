// SPDX-License-Identifier: MIT

//! Centralized environment variable access for the daemon crate.

/// Listen address, `RALPH_ADDR` (default `:9090`, meaning all interfaces on
/// port 9090).
pub fn addr() -> String {
    std::env::var("RALPH_ADDR").unwrap_or_else(|_| ":9090".into())
}

/// Store path, `RALPH_DB` (default `ralph.db`).
pub fn db_path() -> String {
    std::env::var("RALPH_DB").unwrap_or_else(|_| "ralph.db".into())
}

/// `tracing_subscriber::EnvFilter` directive, `RALPH_LOG` (default `info`).
pub fn log_filter() -> String {
    std::env::var("RALPH_LOG").unwrap_or_else(|_| "info".into())
}

/// Resolve `:PORT` or `host:port` into a `std::net::SocketAddr`-parseable
/// string, defaulting the host to all interfaces.
pub fn resolve_listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
