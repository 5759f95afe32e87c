// SPDX-License-Identifier: MIT

use super::*;
use crate::job_repo::JobRepo;
use chrono::Utc;
use ralph_core::{NewJob, Priority};
use std::collections::HashMap;

fn insert_job(store: &Store) -> JobId {
    let repo = JobRepo::new(store);
    let new = NewJob {
        repo_url: "https://example.com/repo.git".into(),
        branch: "main".into(),
        working_dir: None,
        prompt: "go".into(),
        max_iterations: 3,
        priority: Priority::Normal,
        env: HashMap::new(),
    };
    let mut job = ralph_core::Job::from_new(new, Utc::now());
    job.position = 1;
    repo.insert(&job).unwrap()
}

#[test]
fn append_then_list_preserves_order() {
    let store = Store::open_in_memory().unwrap();
    let job_id = insert_job(&store);
    let logs = LogRepo::new(&store);

    logs.append(job_id, 1, "started").unwrap();
    logs.append(job_id, 2, "iterating").unwrap();

    let entries = logs.list(job_id).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "started");
    assert_eq!(entries[1].message, "iterating");
}

#[test]
fn list_for_unknown_job_is_empty() {
    let store = Store::open_in_memory().unwrap();
    let logs = LogRepo::new(&store);
    assert!(logs.list(JobId(999)).unwrap().is_empty());
}