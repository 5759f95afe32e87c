// SPDX-License-Identifier: MIT

//! Deterministic git adapter for tests: records calls, returns a
//! configurable PR URL.

use super::{GitError, GitOps};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum GitCall {
    Clone { repo_url: String, dest: PathBuf },
    CreateBranch { repo_dir: PathBuf, branch: String },
    CommitAll { repo_dir: PathBuf, message: String },
    Push { repo_dir: PathBuf, branch: String },
    OpenPullRequest { repo_dir: PathBuf, branch: String, title: String },
}

#[derive(Default)]
struct FakeState {
    calls: Vec<GitCall>,
    pr_url: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeGitOps {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeGitOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pr_url(&self, url: impl Into<String>) {
        self.inner.lock().pr_url = Some(url.into());
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.inner.lock().error = Some(message.into());
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.inner.lock().calls.clone()
    }

    fn check_error(&self) -> Result<(), GitError> {
        if let Some(message) = self.inner.lock().error.clone() {
            return Err(GitError::CommandFailed(message));
        }
        Ok(())
    }
}

#[async_trait]
impl GitOps for FakeGitOps {
    async fn clone(&self, repo_url: &str, dest: &Path) -> Result<(), GitError> {
        self.inner.lock().calls.push(GitCall::Clone {
            repo_url: repo_url.to_string(),
            dest: dest.to_path_buf(),
        });
        self.check_error()
    }

    async fn create_branch(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        self.inner.lock().calls.push(GitCall::CreateBranch {
            repo_dir: repo_dir.to_path_buf(),
            branch: branch.to_string(),
        });
        self.check_error()
    }

    async fn commit_all(&self, repo_dir: &Path, message: &str) -> Result<(), GitError> {
        self.inner.lock().calls.push(GitCall::CommitAll {
            repo_dir: repo_dir.to_path_buf(),
            message: message.to_string(),
        });
        self.check_error()
    }

    async fn push(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        self.inner.lock().calls.push(GitCall::Push {
            repo_dir: repo_dir.to_path_buf(),
            branch: branch.to_string(),
        });
        self.check_error()
    }

    async fn open_pull_request(&self, repo_dir: &Path, branch: &str, title: &str) -> Result<String, GitError> {
        self.inner.lock().calls.push(GitCall::OpenPullRequest {
            repo_dir: repo_dir.to_path_buf(),
            branch: branch.to_string(),
            title: title.to_string(),
        });
        self.check_error()?;
        Ok(self
            .inner
            .lock()
            .pr_url
            .clone()
            .unwrap_or_else(|| format!("https://example.com/pulls/{branch}")))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
