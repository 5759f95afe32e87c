// SPDX-License-Identifier: MIT

//! Typed server configuration and its merge/validation rules.
//!
//! The config table itself is a flat `(key, value)` store (see
//! `ralph-storage`'s `ConfigRepo`); this module only defines the typed shape
//! and the validation/merge semantics that sit on top of it.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a model is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Unset,
    Gpu,
    Cpu,
    Auto,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Unset => "",
            Device::Gpu => "gpu",
            Device::Cpu => "cpu",
            Device::Auto => "auto",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "" => Ok(Device::Unset),
            "gpu" => Ok(Device::Gpu),
            "cpu" => Ok(Device::Cpu),
            "auto" => Ok(Device::Auto),
            other => Err(CoreError::Validation(format!(
                "invalid device '{other}', expected \"\", gpu, cpu, or auto"
            ))),
        }
    }
}

impl Serialize for Device {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Device {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Device::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Where a single model (large or small) is placed, and how much memory it
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    pub name: String,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub memory_gb: f64,
}

impl ModelPlacement {
    pub fn new(name: impl Into<String>, device: Device, memory_gb: f64) -> Self {
        ModelPlacement {
            name: name.into(),
            device,
            memory_gb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub host: String,
    pub is_remote: bool,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            host: "http://localhost:11434".into(),
            is_remote: false,
        }
    }
}

/// Full typed server configuration, assembled from the `config` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub ollama: OllamaConfig,
    pub large_model: ModelPlacement,
    pub small_model: ModelPlacement,
    pub default_max_iterations: u32,
    pub concurrent_jobs: u32,
    pub workspace_dir: String,
    pub job_retention_days: u32,
    pub max_claude_retries: u32,
    pub max_git_retries: u32,
    pub git_retry_backoff_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            ollama: OllamaConfig::default(),
            large_model: ModelPlacement::new("llama3:70b", Device::Cpu, 42.0),
            small_model: ModelPlacement::new("llama3:8b", Device::Cpu, 5.0),
            default_max_iterations: 10,
            concurrent_jobs: 1,
            workspace_dir: "workspaces".into(),
            job_retention_days: 30,
            max_claude_retries: 3,
            max_git_retries: 3,
            git_retry_backoff_ms: 500,
        }
    }
}

impl ServerConfig {
    /// Validation applied on every full save (§4.4).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ollama.host.trim().is_empty() {
            return Err(CoreError::Validation("ollama.host must not be empty".into()));
        }
        if self.large_model.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "large_model.name must not be empty".into(),
            ));
        }
        if self.small_model.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "small_model.name must not be empty".into(),
            ));
        }
        if self.default_max_iterations == 0 {
            return Err(CoreError::Validation(
                "default_max_iterations must be > 0".into(),
            ));
        }
        if self.concurrent_jobs == 0 {
            return Err(CoreError::Validation("concurrent_jobs must be > 0".into()));
        }
        // job_retention_days is a u32, so >= 0 always holds; kept here as
        // a reminder that the constraint exists should the field widen.
        Ok(())
    }
}

impl ServerConfig {
    /// Apply a raw JSON patch document with field-presence semantics: keys
    /// that are syntactically present (even `0`/`false`) overwrite the
    /// current value; keys that are absent are left untouched. Nested
    /// objects (e.g. `large_model`) are merged recursively rather than
    /// replaced wholesale, so `{"large_model":{"name":"x"}}` preserves the
    /// current `device`/`memory_gb`. The merged result is revalidated.
    pub fn apply_patch(&self, patch: &serde_json::Value) -> Result<ServerConfig, CoreError> {
        let mut base = serde_json::to_value(self)
            .map_err(|e| CoreError::Store(format!("failed to encode config: {e}")))?;
        merge_json(&mut base, patch);
        let merged: ServerConfig = serde_json::from_value(base)
            .map_err(|e| CoreError::Validation(format!("invalid config patch: {e}")))?;
        merged.validate()?;
        Ok(merged)
    }
}

/// Recursively merge `patch` into `base` in place. Present keys (of any
/// value, including `0`/`false`/`null`) overwrite; objects merge field by
/// field; anything else (arrays, scalars) replaces wholesale.
fn merge_json(base: &mut serde_json::Value, patch: &serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_json(base_value, patch_value),
                    None => {
                        base_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (base_slot, patch_value) => {
            *base_slot = patch_value.clone();
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
