// SPDX-License-Identifier: MIT

//! `ralph server-config [set key value]` - read or patch the daemon's
//! `ServerConfig` over HTTP. `key` may be dotted (e.g. `large_model.name`)
//! to reach a nested field; the CLI builds the matching nested JSON patch
//! so the server's field-presence merge only touches that one field.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::client::ApiClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ServerConfigArgs {
    #[command(subcommand)]
    pub command: Option<ServerConfigCommand>,
}

#[derive(Subcommand)]
pub enum ServerConfigCommand {
    /// Set a (possibly dotted) config key, e.g. `large_model.name`
    Set { key: String, value: String },
}

/// Build `{"a": {"b": value}}` from a dotted key `"a.b"`.
fn nested_patch(key: &str, value: Value) -> Value {
    let mut parts: Vec<&str> = key.split('.').collect();
    let mut node = value;
    while let Some(part) = parts.pop() {
        node = serde_json::json!({ part: node });
    }
    node
}

/// Parse a CLI value string into JSON: booleans and numbers are coerced,
/// everything else is treated as a string.
fn parse_value(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        return Value::from(n);
    }
    Value::String(raw.to_string())
}

pub async fn handle(args: ServerConfigArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    match args.command {
        None => {
            let config = client.get_config().await?;
            match format {
                OutputFormat::Text => print_server_config(&config),
                OutputFormat::Json => print_json(&config)?,
            }
        }
        Some(ServerConfigCommand::Set { key, value }) => {
            let patch = nested_patch(&key, parse_value(&value));
            let config = client.patch_config(&patch).await?;
            match format {
                OutputFormat::Text => {
                    println!("Set {key} = {value}");
                    print_server_config(&config);
                }
                OutputFormat::Json => print_json(&config)?,
            }
        }
    }
    Ok(())
}

fn print_server_config(config: &ralph_core::ServerConfig) {
    println!("ollama.host = {}", config.ollama.host);
    println!(
        "large_model = {} ({}, {}GB)",
        config.large_model.name, config.large_model.device, config.large_model.memory_gb
    );
    println!(
        "small_model = {} ({}, {}GB)",
        config.small_model.name, config.small_model.device, config.small_model.memory_gb
    );
    println!("default_max_iterations = {}", config.default_max_iterations);
    println!("concurrent_jobs = {}", config.concurrent_jobs);
    println!("workspace_dir = {}", config.workspace_dir);
    println!("job_retention_days = {}", config.job_retention_days);
}

#[cfg(test)]
#[path = "server_config_tests.rs"]
mod tests;
