// SPDX-License-Identifier: MIT

//! `ralph config [set key value]` - the CLI's own config file (currently
//! just `server_url`). Not to be confused with `ralph server-config`,
//! which edits the daemon's `ServerConfig`.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{self, CliConfig};
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Set a config key (currently only `server_url`)
    Set { key: String, value: String },
}

pub fn handle(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        None => {
            let cfg = config::load()?;
            match format {
                OutputFormat::Text => println!("server_url = {}", cfg.server_url),
                OutputFormat::Json => print_json(&cfg)?,
            }
        }
        Some(ConfigCommand::Set { key, value }) => {
            let mut cfg = config::load()?;
            apply_set(&mut cfg, &key, value)?;
            config::save(&cfg)?;
            match format {
                OutputFormat::Text => println!("Set {key} = {}", cfg.server_url),
                OutputFormat::Json => print_json(&cfg)?,
            }
        }
    }
    Ok(())
}

fn apply_set(cfg: &mut CliConfig, key: &str, value: String) -> Result<()> {
    match key {
        "server_url" => {
            cfg.server_url = value;
            Ok(())
        }
        other => anyhow::bail!("unknown config key '{other}', expected server_url"),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
