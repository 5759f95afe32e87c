// SPDX-License-Identifier: MIT

//! `ralph resume <id>`.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ResumeArgs {
    pub id: i64,
}

pub async fn handle(args: ResumeArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    let job = client.resume_job(args.id).await?;
    match format {
        OutputFormat::Text => println!("Resumed job {}", job.id),
        OutputFormat::Json => print_json(&job)?,
    }
    Ok(())
}
