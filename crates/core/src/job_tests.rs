// SPDX-License-Identifier: MIT

use super::*;
use chrono::Utc;
use std::collections::HashMap;

fn new_job(priority: Priority) -> NewJob {
    NewJob {
        repo_url: "git@github.com:u/r.git".into(),
        branch: "feature/x".into(),
        working_dir: None,
        prompt: "do it".into(),
        max_iterations: 3,
        priority,
        env: HashMap::new(),
    }
}

#[test]
fn result_branch_is_derived() {
    assert_eq!(result_branch_name("feature/x"), "ralph/feature/x-result");
}

#[test]
fn from_new_sets_defaults() {
    let job = Job::from_new(new_job(Priority::High), Utc::now());
    assert_eq!(job.status, Status::Queued);
    assert_eq!(job.iteration, 0);
    assert_eq!(job.result_branch, "ralph/feature/x-result");
    assert!(job.started_at.is_none());
}

#[test]
fn validate_new_rejects_empty_fields() {
    let mut new = new_job(Priority::Normal);
    new.repo_url = "".into();
    assert!(Job::validate_new(&new).is_err());

    let mut new = new_job(Priority::Normal);
    new.branch = "  ".into();
    assert!(Job::validate_new(&new).is_err());

    let mut new = new_job(Priority::Normal);
    new.prompt = "".into();
    assert!(Job::validate_new(&new).is_err());

    let mut new = new_job(Priority::Normal);
    new.max_iterations = 0;
    assert!(Job::validate_new(&new).is_err());
}

#[test]
fn priority_parses_case_insensitively() {
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!("Normal".parse::<Priority>().unwrap(), Priority::Normal);
    assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn legal_transitions_succeed() {
    let mut job = Job::from_new(new_job(Priority::Normal), Utc::now());
    let now = Utc::now();
    job.transition(Status::Running, now).unwrap();
    assert_eq!(job.status, Status::Running);
    assert_eq!(job.started_at, Some(now));

    job.transition(Status::Paused, now).unwrap();
    assert_eq!(job.status, Status::Paused);
    assert_eq!(job.paused_at, Some(now));

    job.transition(Status::Running, now).unwrap();
    assert_eq!(job.status, Status::Running);

    job.transition(Status::Completed, now).unwrap();
    assert_eq!(job.status, Status::Completed);
    assert_eq!(job.completed_at, Some(now));
}

#[test]
fn started_at_is_set_once() {
    let mut job = Job::from_new(new_job(Priority::Normal), Utc::now());
    let t1 = Utc::now();
    job.transition(Status::Running, t1).unwrap();
    job.transition(Status::Paused, t1).unwrap();
    let t2 = t1 + chrono::Duration::seconds(5);
    job.transition(Status::Running, t2).unwrap();
    assert_eq!(job.started_at, Some(t1));
}

#[test]
fn illegal_transition_is_rejected_and_job_unchanged() {
    let mut job = Job::from_new(new_job(Priority::Normal), Utc::now());
    let before = job.clone();
    let err = job.transition(Status::Completed, Utc::now()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTransition { .. }));
    assert_eq!(job, before);
}

#[test]
fn terminal_states_have_no_outbound_transitions() {
    for terminal in [Status::Completed, Status::Failed, Status::Cancelled] {
        for target in [
            Status::Queued,
            Status::Running,
            Status::Paused,
            Status::Completed,
            Status::Failed,
            Status::Cancelled,
        ] {
            if terminal == target {
                continue;
            }
            assert!(!terminal.can_transition_to(target));
        }
    }
}

#[test]
fn iterations_exhausted_is_a_signal_not_a_status() {
    let mut job = Job::from_new(new_job(Priority::Normal), Utc::now());
    job.iteration = job.max_iterations;
    assert!(job.iterations_exhausted());
    assert_eq!(job.status, Status::Queued);
}
