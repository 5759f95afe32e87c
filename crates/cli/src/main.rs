// SPDX-License-Identifier: MIT

//! ralph - CLI for the ralph job-orchestration daemon.

mod client;
mod color;
mod commands;
mod config;
mod env;
mod output;
mod table;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use commands::{cancel, config as config_cmd, logs, move_job, pause, resume, server_config, status, submit};

#[derive(Parser)]
#[command(name = "ralph", version, about = "Control the ralph job-orchestration daemon")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new job
    Submit(submit::SubmitArgs),
    /// Show a single job, or list all jobs
    Status(status::StatusArgs),
    /// View a job's iteration log
    Logs(logs::LogsArgs),
    /// Cancel a job
    Cancel(cancel::CancelArgs),
    /// Pause a running job
    Pause(pause::PauseArgs),
    /// Resume a paused job
    Resume(resume::ResumeArgs),
    /// Reposition a queued job
    Move(move_job::MoveArgs),
    /// Read or set the CLI's own config
    Config(config_cmd::ConfigArgs),
    /// Read or set the daemon's server config
    ServerConfig(server_config::ServerConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain when the top-level
/// message already contains its source (common with thiserror `#[from]`).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }
    let mut buf = top;
    for cause in err.chain().skip(1) {
        buf.push_str(&format!("\n\nCaused by:\n    {cause}"));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let base_url = config::effective_server_url()?;
    let client = ApiClient::new(base_url, env::timeout());

    match cli.command {
        Commands::Submit(args) => submit::handle(args, &client, format).await,
        Commands::Status(args) => status::handle(args, &client, format).await,
        Commands::Logs(args) => logs::handle(args, &client, format).await,
        Commands::Cancel(args) => cancel::handle(args, &client, format).await,
        Commands::Pause(args) => pause::handle(args, &client, format).await,
        Commands::Resume(args) => resume::handle(args, &client, format).await,
        Commands::Move(args) => move_job::handle(args, &client, format).await,
        Commands::Config(args) => config_cmd::handle(args, format),
        Commands::ServerConfig(args) => server_config::handle(args, &client, format).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
