use crate::prelude::Daemon;

#[test]
fn submit_returns_a_queued_job() {
    let daemon = Daemon::spawn();
    let run = daemon
        .cli()
        .args(&["-o", "json", "submit", "git@example.com:u/r.git", "feature/widget", "fix the thing"])
        .passes();

    let job = run.json();
    assert_eq!(job["status"], "queued");
    assert_eq!(job["branch"], "feature/widget");
    assert_eq!(job["priority"], "normal");
    assert_eq!(job["result_branch"], "ralph/feature/widget-result");
}

#[test]
fn submit_honors_priority_and_max_iterations() {
    let daemon = Daemon::spawn();
    let run = daemon
        .cli()
        .args(&[
            "-o",
            "json",
            "submit",
            "git@example.com:u/r.git",
            "feature/urgent",
            "do it now",
            "--priority",
            "high",
            "--max-iterations",
            "3",
        ])
        .passes();

    let job = run.json();
    assert_eq!(job["priority"], "high");
    assert_eq!(job["max_iterations"], 3);
}

#[test]
fn submit_rejects_an_unknown_priority() {
    let daemon = Daemon::spawn();
    daemon
        .cli()
        .args(&["submit", "git@example.com:u/r.git", "feature/x", "do it", "--priority", "urgent"])
        .fails()
        .stderr_contains("invalid priority");
}

#[test]
fn status_text_output_shows_the_branch_and_repo() {
    let daemon = Daemon::spawn();
    let created = daemon
        .cli()
        .args(&["-o", "json", "submit", "git@example.com:u/r.git", "feature/show-me", "prompt text"])
        .passes()
        .json();
    let id = created["id"].as_i64().unwrap().to_string();

    daemon
        .cli()
        .args(&["status", &id])
        .passes()
        .stdout_contains("feature/show-me")
        .stdout_contains("git@example.com:u/r.git");
}

#[test]
fn status_list_includes_submitted_jobs() {
    let daemon = Daemon::spawn();
    daemon
        .cli()
        .args(&["submit", "git@example.com:u/r.git", "feature/list-me", "prompt text"])
        .passes();

    let jobs = daemon.cli().args(&["-o", "json", "status"]).passes().json();
    let found = jobs["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .any(|j| j["branch"] == "feature/list-me");
    assert!(found, "expected submitted job in list: {jobs}");
}
