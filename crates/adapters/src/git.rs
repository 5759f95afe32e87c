// SPDX-License-Identifier: MIT

//! The git adapter: clone/branch/commit/push/PR-open, shelling out to
//! `git` and `gh`, retried per operation with linear backoff.

use crate::subprocess::{retry, run_with_timeout};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command failed: {0}")]
    CommandFailed(String),
}

#[async_trait]
pub trait GitOps: Send + Sync + 'static {
    async fn clone(&self, repo_url: &str, dest: &Path) -> Result<(), GitError>;
    async fn create_branch(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError>;
    async fn commit_all(&self, repo_dir: &Path, message: &str) -> Result<(), GitError>;
    async fn push(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError>;
    async fn open_pull_request(&self, repo_dir: &Path, branch: &str, title: &str) -> Result<String, GitError>;
}

pub struct SubprocessGitOps {
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub timeout: Duration,
}

impl SubprocessGitOps {
    pub fn new(max_retries: u32, retry_backoff_ms: u64) -> Self {
        SubprocessGitOps {
            max_retries,
            retry_backoff_ms,
            timeout: Duration::from_secs(120),
        }
    }

    async fn run(&self, cmd: Command, description: &str) -> Result<String, GitError> {
        let output = run_with_timeout(cmd, self.timeout, description)
            .await
            .map_err(GitError::CommandFailed)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed(format!("{description}: {stderr}")));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn run_retrying(&self, build: impl Fn() -> Command, description: &str) -> Result<String, GitError> {
        retry(self.max_retries, self.retry_backoff_ms, || self.run(build(), description)).await
    }
}

#[async_trait]
impl GitOps for SubprocessGitOps {
    async fn clone(&self, repo_url: &str, dest: &Path) -> Result<(), GitError> {
        let repo_url = repo_url.to_string();
        let dest = dest.to_path_buf();
        self.run_retrying(
            || {
                let mut cmd = Command::new("git");
                cmd.args(["clone", &repo_url]).arg(&dest);
                cmd
            },
            "git clone",
        )
        .await?;
        Ok(())
    }

    async fn create_branch(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        let repo_dir = repo_dir.to_path_buf();
        let branch = branch.to_string();
        self.run_retrying(
            || {
                let mut cmd = Command::new("git");
                cmd.current_dir(&repo_dir).args(["checkout", "-b", &branch]);
                cmd
            },
            "git checkout -b",
        )
        .await?;
        Ok(())
    }

    async fn commit_all(&self, repo_dir: &Path, message: &str) -> Result<(), GitError> {
        let repo_dir = repo_dir.to_path_buf();
        self.run_retrying(
            {
                let repo_dir = repo_dir.clone();
                move || {
                    let mut cmd = Command::new("git");
                    cmd.current_dir(&repo_dir).args(["add", "-A"]);
                    cmd
                }
            },
            "git add",
        )
        .await?;

        let message = message.to_string();
        self.run_retrying(
            || {
                let mut cmd = Command::new("git");
                cmd.current_dir(&repo_dir).args(["commit", "-m", &message]);
                cmd
            },
            "git commit",
        )
        .await?;
        Ok(())
    }

    async fn push(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        let repo_dir = repo_dir.to_path_buf();
        let branch = branch.to_string();
        self.run_retrying(
            || {
                let mut cmd = Command::new("git");
                cmd.current_dir(&repo_dir).args(["push", "-u", "origin", &branch]);
                cmd
            },
            "git push",
        )
        .await?;
        Ok(())
    }

    async fn open_pull_request(&self, repo_dir: &Path, branch: &str, title: &str) -> Result<String, GitError> {
        let repo_dir = repo_dir.to_path_buf();
        let branch = branch.to_string();
        let title = title.to_string();
        self.run_retrying(
            || {
                let mut cmd = Command::new("gh");
                cmd.current_dir(&repo_dir)
                    .args(["pr", "create", "--head", &branch, "--title", &title, "--body", ""]);
                cmd
            },
            "gh pr create",
        )
        .await
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGitOps, GitCall};

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
