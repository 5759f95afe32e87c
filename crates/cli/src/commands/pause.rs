// SPDX-License-Identifier: MIT

//! `ralph pause <id>`.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct PauseArgs {
    pub id: i64,
}

pub async fn handle(args: PauseArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    let job = client.pause_job(args.id).await?;
    match format {
        OutputFormat::Text => println!("Paused job {}", job.id),
        OutputFormat::Json => print_json(&job)?,
    }
    Ok(())
}
