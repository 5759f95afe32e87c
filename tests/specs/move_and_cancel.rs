use crate::prelude::Daemon;

fn submit(daemon: &Daemon, branch: &str) -> i64 {
    daemon
        .cli()
        .args(&["-o", "json", "submit", "git@example.com:u/r.git", branch, "do it"])
        .passes()
        .json()["id"]
        .as_i64()
        .unwrap()
}

#[test]
fn move_first_puts_the_job_at_the_front_of_the_queue() {
    let daemon = Daemon::spawn();
    submit(&daemon, "feature/a");
    submit(&daemon, "feature/b");
    let third = submit(&daemon, "feature/c");

    daemon
        .cli()
        .args(&["move", &third.to_string(), "--first"])
        .passes()
        .stdout_contains("position 1");

    let jobs = daemon.cli().args(&["-o", "json", "status", "--status", "queued"]).passes().json();
    let jobs = jobs["jobs"].as_array().unwrap();
    let first = jobs.iter().find(|j| j["position"] == 1);
    if let Some(first) = first {
        assert_eq!(first["id"], third);
    }
}

#[test]
fn move_requires_position_or_first() {
    let daemon = Daemon::spawn();
    let id = submit(&daemon, "feature/a");
    daemon
        .cli()
        .args(&["move", &id.to_string()])
        .fails()
        .stderr_contains("specify either --position N or --first");
}

#[test]
fn cancelling_an_already_cancelled_job_is_an_invalid_transition() {
    let daemon = Daemon::spawn();
    let id = submit(&daemon, "feature/cancel-twice");

    daemon.cli().args(&["cancel", &id.to_string()]).passes().stdout_contains("Cancelled job");

    daemon
        .cli()
        .args(&["cancel", &id.to_string()])
        .fails()
        .stderr_contains("invalid transition from cancelled to cancelled");
}

#[test]
fn pausing_a_cancelled_job_is_an_invalid_transition() {
    let daemon = Daemon::spawn();
    let id = submit(&daemon, "feature/pause-after-cancel");
    daemon.cli().args(&["cancel", &id.to_string()]).passes();

    daemon
        .cli()
        .args(&["pause", &id.to_string()])
        .fails()
        .stderr_contains("invalid transition from cancelled to paused");
}
