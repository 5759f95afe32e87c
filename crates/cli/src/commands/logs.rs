// SPDX-License-Identifier: MIT

//! `ralph logs <id>` - view a job's iteration log.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LogsArgs {
    pub id: i64,
}

pub async fn handle(args: LogsArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    let logs = client.job_logs(args.id).await?;

    match format {
        OutputFormat::Text => {
            if logs.logs.is_empty() {
                println!("No log entries for job {}", args.id);
            }
            for entry in &logs.logs {
                println!(
                    "[{}] iter {} - {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.iteration,
                    entry.message
                );
            }
        }
        OutputFormat::Json => print_json(&logs)?,
    }
    Ok(())
}
