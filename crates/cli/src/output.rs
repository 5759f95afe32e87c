// SPDX-License-Identifier: MIT

//! Text/JSON output formatting shared across subcommands.

use crate::color;
use crate::table::{Column, Table};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use ralph_core::Job;

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a timestamp as relative time (e.g. "5s", "2m", "1h", "3d").
pub fn format_time_ago(at: DateTime<Utc>) -> String {
    let elapsed = (Utc::now() - at).num_seconds().max(0);
    if elapsed < 60 {
        format!("{elapsed}s")
    } else if elapsed < 3600 {
        format!("{}m", elapsed / 60)
    } else if elapsed < 86400 {
        format!("{}h", elapsed / 3600)
    } else {
        format!("{}d", elapsed / 86400)
    }
}

pub fn print_job_list(out: &mut impl std::io::Write, jobs: &[Job]) {
    if jobs.is_empty() {
        let _ = writeln!(out, "No jobs");
        return;
    }

    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("BRANCH"),
        Column::left("PRIORITY"),
        Column::status("STATUS"),
        Column::right("ITER"),
        Column::left("UPDATED"),
    ]);

    for job in jobs {
        let updated = job.completed_at.or(job.started_at).unwrap_or(job.created_at);
        table.row(vec![
            job.id.to_string(),
            job.branch.clone(),
            job.priority.to_string(),
            job.status.to_string(),
            format!("{}/{}", job.iteration, job.max_iterations),
            format_time_ago(updated),
        ]);
    }

    table.render(out);
}

pub fn print_job_detail(job: &Job) {
    println!("{} {}", color::header("Job:"), job.id);
    println!("  {} {}", color::context("Branch:"), job.branch);
    println!("  {} {}", color::context("Repo:"), job.repo_url);
    println!("  {} {}", color::context("Status:"), color::status(&job.status.to_string()));
    println!("  {} {}", color::context("Priority:"), job.priority);
    println!("  {} {}/{}", color::context("Iteration:"), job.iteration, job.max_iterations);
    println!("  {} {}", color::context("Result branch:"), job.result_branch);
    if let Some(pr_url) = &job.pr_url {
        println!("  {} {}", color::context("PR:"), pr_url);
    }
    if let Some(error) = &job.error {
        println!("  {} {}", color::context("Error:"), error);
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
