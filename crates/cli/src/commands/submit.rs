// SPDX-License-Identifier: MIT

//! `ralph submit` - create a new job.

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use ralph_wire::CreateJobRequest;

use crate::client::ApiClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct SubmitArgs {
    /// Repository to clone
    pub repo_url: String,
    /// Branch to work from
    pub branch: String,
    /// Prompt describing the job
    pub prompt: String,
    /// Maximum number of iterations
    #[arg(long, default_value_t = 10)]
    pub max_iterations: u32,
    /// Priority: high, normal, or low
    #[arg(long)]
    pub priority: Option<String>,
    /// Working directory within the repository
    #[arg(long)]
    pub working_dir: Option<String>,
    /// Environment variable for the job (repeatable: --env KEY=VALUE)
    #[arg(long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,
}

pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid env entry '{s}': must be key=value"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

pub async fn handle(args: SubmitArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    let request = CreateJobRequest {
        repo_url: args.repo_url,
        branch: args.branch,
        prompt: args.prompt,
        max_iterations: args.max_iterations,
        priority: args.priority,
        working_dir: args.working_dir,
        env: if args.env.is_empty() {
            None
        } else {
            Some(args.env.into_iter().collect::<HashMap<_, _>>())
        },
    };
    let job = client.create_job(&request).await?;

    match format {
        OutputFormat::Text => {
            println!("Submitted job {} ({})", job.id, job.result_branch);
        }
        OutputFormat::Json => print_json(&job)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
