// SPDX-License-Identifier: MIT

use super::*;
use chrono::Duration as ChronoDuration;
use ralph_core::{NewJob, Priority};
use std::collections::HashMap;

fn sample_job() -> Job {
    let new = NewJob {
        repo_url: "git@github.com:u/r.git".into(),
        branch: "feature/x".into(),
        working_dir: None,
        prompt: "do it".into(),
        max_iterations: 5,
        priority: Priority::Normal,
        env: HashMap::new(),
    };
    Job::from_new(new, Utc::now())
}

#[test]
fn format_time_ago_reports_seconds_for_recent_timestamps() {
    assert_eq!(format_time_ago(Utc::now()), "0s");
}

#[test]
fn format_time_ago_reports_minutes() {
    let at = Utc::now() - ChronoDuration::seconds(125);
    assert_eq!(format_time_ago(at), "2m");
}

#[test]
fn print_job_list_reports_no_jobs_when_empty() {
    let mut buf = Vec::new();
    print_job_list(&mut buf, &[]);
    assert_eq!(String::from_utf8(buf).unwrap(), "No jobs\n");
}

#[test]
fn print_job_list_renders_a_row_per_job() {
    let job = sample_job();
    let mut buf = Vec::new();
    print_job_list(&mut buf, &[job.clone()]);
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains(&job.branch));
    assert!(out.contains("queued"));
}