// SPDX-License-Identifier: MIT

//! `ralph status [id]` - show a single job, or list all jobs.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::{print_job_detail, print_job_list, print_json, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Job ID. If omitted, lists all jobs.
    pub id: Option<i64>,
    /// Filter by status when listing (comma-separated)
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn handle(args: StatusArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    match args.id {
        Some(id) => {
            let job = client.get_job(id).await?;
            match format {
                OutputFormat::Text => print_job_detail(&job),
                OutputFormat::Json => print_json(&job)?,
            }
        }
        None => {
            let list = client.list_jobs(args.status.as_deref()).await?;
            match format {
                OutputFormat::Text => {
                    let mut out = std::io::stdout();
                    print_job_list(&mut out, &list.jobs);
                }
                OutputFormat::Json => print_json(&list)?,
            }
        }
    }
    Ok(())
}
