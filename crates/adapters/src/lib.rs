// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ralph-adapters: the executor and git adapters the worker loop drives
//! per iteration, each with a real subprocess implementation and a
//! deterministic fake for tests.

pub mod executor;
pub mod git;
pub mod subprocess;

pub use executor::{ExecutorAdapter, ExecutorError, IterationOutcome, SubprocessExecutorAdapter};
pub use git::{GitError, GitOps, SubprocessGitOps};

#[cfg(any(test, feature = "test-support"))]
pub use executor::{ExecutorCall, FakeExecutorAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use git::{FakeGitOps, GitCall};
