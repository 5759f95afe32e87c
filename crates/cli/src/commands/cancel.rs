// SPDX-License-Identifier: MIT

//! `ralph cancel <id>`.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::{print_job_detail, print_json, OutputFormat};

#[derive(Args)]
pub struct CancelArgs {
    pub id: i64,
}

pub async fn handle(args: CancelArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    let job = client.cancel_job(args.id).await?;
    match format {
        OutputFormat::Text => {
            println!("Cancelled job {}", job.id);
            print_job_detail(&job);
        }
        OutputFormat::Json => print_json(&job)?,
    }
    Ok(())
}
