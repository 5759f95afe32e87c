// SPDX-License-Identifier: MIT

//! `ralph move <id> [--position N|--first]` - reposition a queued job.
//!
//! The server only exposes a full-permutation reorder endpoint, so this
//! reconstructs the current queue order client-side (via each job's
//! `position` field) before resubmitting it with `id` moved.

use anyhow::Result;
use clap::Args;

use crate::client::ApiClient;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct MoveArgs {
    pub id: i64,
    /// 1-based target position within the queue
    #[arg(long, conflicts_with = "first")]
    pub position: Option<u32>,
    /// Move to the front of the queue
    #[arg(long)]
    pub first: bool,
}

/// Reinsert `id` into `ids` at the 1-based `position` (or the front, if
/// `first`), returning the new permutation and the 0-based index it landed
/// at. Returns `None` if `id` is not present in `ids`.
fn reinsert(mut ids: Vec<i64>, id: i64, position: Option<u32>, first: bool) -> Option<(Vec<i64>, usize)> {
    let current_index = ids.iter().position(|&x| x == id)?;
    ids.remove(current_index);

    let target_index = if first {
        0
    } else {
        let requested = position.unwrap_or(1).saturating_sub(1) as usize;
        requested.min(ids.len())
    };
    ids.insert(target_index, id);
    Some((ids, target_index))
}

pub async fn handle(args: MoveArgs, client: &ApiClient, format: OutputFormat) -> Result<()> {
    if args.position.is_none() && !args.first {
        anyhow::bail!("specify either --position N or --first");
    }

    let list = client.list_jobs(Some("queued")).await?;
    let mut jobs = list.jobs;
    jobs.sort_by_key(|j| j.position);
    let ids: Vec<i64> = jobs.iter().map(|j| j.id.0).collect();

    let (ids, target_index) = reinsert(ids, args.id, args.position, args.first)
        .ok_or_else(|| anyhow::anyhow!("job {} is not currently queued", args.id))?;

    client.reorder_jobs(ids.clone()).await?;

    match format {
        OutputFormat::Text => println!("Moved job {} to position {}", args.id, target_index + 1),
        OutputFormat::Json => crate::output::print_json(&serde_json::json!({
            "job_ids": ids,
        }))?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "move_job_tests.rs"]
mod tests;
