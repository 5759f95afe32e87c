// SPDX-License-Identifier: MIT

//! The CLI's own config file: `<config dir>/ralph/config.yaml`. Distinct
//! from the daemon's `ServerConfig` (see `commands::server_config`), this
//! only holds client-side settings -- currently just `server_url`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[source] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    "http://localhost:9090".into()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            server_url: default_server_url(),
        }
    }
}

/// `<config dir>/ralph/config.yaml`, honoring `XDG_CONFIG_HOME` on Unix and
/// `APPDATA` on Windows via `dirs::config_dir()`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("ralph").join("config.yaml"))
}

/// Load the CLI config, falling back to defaults if the file doesn't exist.
pub fn load() -> Result<CliConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
}

/// Persist the CLI config, creating the parent directory if needed.
pub fn save(config: &CliConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
    }
    let text = serde_yaml::to_string(config).map_err(ConfigError::Encode)?;
    std::fs::write(&path, text).map_err(|source| ConfigError::Write { path, source })
}

/// Resolve the effective server URL: `RALPH_SERVER_URL` env var > config
/// file > built-in default.
pub fn effective_server_url() -> Result<String, ConfigError> {
    if let Some(url) = crate::env::server_url() {
        return Ok(url);
    }
    Ok(load()?.server_url)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
