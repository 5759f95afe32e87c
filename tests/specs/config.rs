use crate::prelude::cli;

#[test]
fn config_defaults_to_localhost() {
    let tmp = tempfile::tempdir().unwrap();
    cli()
        .env("XDG_CONFIG_HOME", tmp.path().to_str().unwrap())
        .args(&["config"])
        .passes()
        .stdout_contains("http://localhost:9090");
}

#[test]
fn config_set_persists_across_invocations() {
    let tmp = tempfile::tempdir().unwrap();
    cli()
        .env("XDG_CONFIG_HOME", tmp.path().to_str().unwrap())
        .args(&["config", "set", "server_url", "http://example.com:7777"])
        .passes()
        .stdout_contains("Set server_url = http://example.com:7777");

    cli()
        .env("XDG_CONFIG_HOME", tmp.path().to_str().unwrap())
        .args(&["config"])
        .passes()
        .stdout_contains("http://example.com:7777");
}

#[test]
fn config_set_rejects_unknown_keys() {
    let tmp = tempfile::tempdir().unwrap();
    cli()
        .env("XDG_CONFIG_HOME", tmp.path().to_str().unwrap())
        .args(&["config", "set", "nonsense", "x"])
        .fails()
        .stderr_contains("unknown config key");
}
