//! Test helpers for behavioral specifications.
//!
//! Black-box: spawns a real `ralphd` against a temp SQLite file and an
//! ephemeral TCP port, then drives it through the real `ralph` binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output};
use std::time::{Duration, Instant};

pub const SPEC_POLL_INTERVAL_MS: u64 = 20;
pub const SPEC_WAIT_MAX_MS: u64 = 3000;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale (e.g. compiled by a removed worktree
/// into a shared target directory).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn ralph_binary() -> PathBuf {
    binary_path("ralph")
}

fn ralphd_binary() -> PathBuf {
    binary_path("ralphd")
}

/// A running `ralphd` instance, bound to an ephemeral localhost port with
/// its own SQLite file under a temp directory. Killed on drop.
pub struct Daemon {
    child: Child,
    pub base_url: String,
    _tempdir: tempfile::TempDir,
}

impl Daemon {
    /// Start a fresh daemon and block until it answers `/health`.
    pub fn spawn() -> Self {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let port = free_port();
        let db_path = tempdir.path().join("ralph.db");
        let base_url = format!("http://127.0.0.1:{port}");

        let child = Command::new(ralphd_binary())
            .env("RALPH_ADDR", format!("127.0.0.1:{port}"))
            .env("RALPH_DB", &db_path)
            .env("RALPH_LOG", "error")
            .spawn()
            .expect("ralphd should spawn");

        let daemon = Daemon { child, base_url, _tempdir: tempdir };
        daemon.wait_until_healthy();
        daemon
    }

    fn wait_until_healthy(&self) {
        let deadline = Instant::now() + Duration::from_millis(SPEC_WAIT_MAX_MS);
        loop {
            let status = cli()
                .env("RALPH_SERVER_URL", &self.base_url)
                .args(&["status"])
                .command()
                .output();
            if let Ok(output) = status {
                if output.status.success() {
                    return;
                }
            }
            if Instant::now() >= deadline {
                panic!("ralphd did not become healthy within {SPEC_WAIT_MAX_MS}ms");
            }
            std::thread::sleep(Duration::from_millis(SPEC_POLL_INTERVAL_MS));
        }
    }

    /// A [`CliBuilder`] pre-wired with this daemon's `RALPH_SERVER_URL`.
    pub fn cli(&self) -> CliBuilder {
        cli().env("RALPH_SERVER_URL", &self.base_url)
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port").local_addr().unwrap().port()
}

/// Returns a Command configured to run the `ralph` binary.
pub fn ralph_cmd() -> Command {
    Command::new(ralph_binary())
}

/// Create a CLI builder for `ralph` commands.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self { args: Vec::new(), dir: None, envs: Vec::new() }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = ralph_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        // Isolate from any config file a developer's $HOME might have.
        cmd.env_remove("RALPH_SERVER_URL");
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0).
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code).
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}",
            String::from_utf8_lossy(&output.stdout),
        );
        RunAssert { output }
    }
}

/// Assertions on a completed command's output.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn stdout_contains(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "expected stdout to contain {needle:?}, got:\n{}",
            self.stdout()
        );
        self
    }

    pub fn stderr_contains(self, needle: &str) -> Self {
        assert!(
            self.stderr().contains(needle),
            "expected stderr to contain {needle:?}, got:\n{}",
            self.stderr()
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be valid JSON")
    }
}
