// SPDX-License-Identifier: MIT

use super::*;
use crate::store::Store;
use chrono::Utc;
use ralph_core::{NewJob, Priority};
use std::collections::HashMap;

fn sample(branch: &str, priority: Priority) -> Job {
    let new = NewJob {
        repo_url: "https://example.com/repo.git".into(),
        branch: branch.into(),
        working_dir: None,
        prompt: "do the thing".into(),
        max_iterations: 5,
        priority,
        env: HashMap::new(),
    };
    Job::from_new(new, Utc::now())
}

#[test]
fn insert_assigns_id_and_get_round_trips() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);
    let mut job = sample("feature-a", Priority::Normal);
    job.position = 1;
    let id = repo.insert(&job).unwrap();
    assert!(id.0 > 0);

    let fetched = repo.get(id).unwrap().unwrap();
    assert_eq!(fetched.repo_url, job.repo_url);
    assert_eq!(fetched.status, Status::Queued);
    assert_eq!(fetched.result_branch, "ralph/feature-a-result");
}

#[test]
fn get_missing_returns_none() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);
    assert!(repo.get(JobId(42)).unwrap().is_none());
}

#[test]
fn queued_ordered_respects_priority_then_position() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);

    let mut low = sample("low", Priority::Low);
    low.position = 1;
    repo.insert(&low).unwrap();

    let mut high = sample("high", Priority::High);
    high.position = 2;
    repo.insert(&high).unwrap();

    let mut normal = sample("normal", Priority::Normal);
    normal.position = 3;
    repo.insert(&normal).unwrap();

    let ordered = repo.queued_ordered().unwrap();
    let branches: Vec<_> = ordered.iter().map(|j| j.branch.as_str()).collect();
    assert_eq!(branches, vec!["high", "normal", "low"]);
}

#[test]
fn reorder_rejects_a_set_that_does_not_match_queued_jobs() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);
    let mut job = sample("a", Priority::Normal);
    job.position = 1;
    repo.insert(&job).unwrap();

    let result = repo.reorder(&[JobId(999)]);
    assert!(result.is_err());
}

#[test]
fn reorder_rewrites_positions_in_given_order() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);

    let mut a = sample("a", Priority::Normal);
    a.position = 1;
    let id_a = repo.insert(&a).unwrap();

    let mut b = sample("b", Priority::Normal);
    b.position = 2;
    let id_b = repo.insert(&b).unwrap();

    repo.reorder(&[id_b, id_a]).unwrap();

    assert_eq!(repo.get(id_b).unwrap().unwrap().position, 1);
    assert_eq!(repo.get(id_a).unwrap().unwrap().position, 2);
}

#[test]
fn list_filters_by_status_and_reports_total() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);

    let mut queued = sample("queued-one", Priority::Normal);
    queued.position = 1;
    repo.insert(&queued).unwrap();

    let mut running = sample("running-one", Priority::Normal);
    running.position = 1;
    running.transition(Status::Running, Utc::now()).unwrap();
    repo.insert(&running).unwrap();

    let (jobs, total) = repo.list(Some(&[Status::Running]), 10, 0).unwrap();
    assert_eq!(total, 1);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].branch, "running-one");
}

#[test]
fn delete_cascades_to_job_logs() {
    let store = Store::open_in_memory().unwrap();
    let repo = JobRepo::new(&store);
    let mut job = sample("a", Priority::Normal);
    job.position = 1;
    let id = repo.insert(&job).unwrap();

    store
        .with_conn(|conn| {
            Ok(conn.execute(
                "INSERT INTO job_logs (job_id, iteration, timestamp, message) VALUES (?1, 0, datetime('now'), 'hi')",
                [id.0],
            )?)
        })
        .unwrap();

    assert!(repo.delete(id).unwrap());

    let remaining: i64 = store
        .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM job_logs", [], |row| row.get(0))?))
        .unwrap();
    assert_eq!(remaining, 0);
}