use crate::prelude::Daemon;

#[test]
fn server_config_reports_defaults() {
    let daemon = Daemon::spawn();
    let config = daemon.cli().args(&["-o", "json", "server-config"]).passes().json();
    assert_eq!(config["concurrent_jobs"], 1);
    assert_eq!(config["ollama"]["host"], "http://localhost:11434");
}

#[test]
fn server_config_set_updates_a_flat_field() {
    let daemon = Daemon::spawn();
    daemon
        .cli()
        .args(&["server-config", "set", "concurrent_jobs", "3"])
        .passes()
        .stdout_contains("Set concurrent_jobs = 3");

    let config = daemon.cli().args(&["-o", "json", "server-config"]).passes().json();
    assert_eq!(config["concurrent_jobs"], 3);
}

#[test]
fn server_config_set_updates_only_the_targeted_nested_field() {
    let daemon = Daemon::spawn();
    let before = daemon.cli().args(&["-o", "json", "server-config"]).passes().json();
    let original_device = before["large_model"]["device"].clone();

    daemon
        .cli()
        .args(&["server-config", "set", "large_model.name", "llama3.1"])
        .passes();

    let after = daemon.cli().args(&["-o", "json", "server-config"]).passes().json();
    assert_eq!(after["large_model"]["name"], "llama3.1");
    assert_eq!(after["large_model"]["device"], original_device);
}
