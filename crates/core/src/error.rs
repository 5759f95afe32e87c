// SPDX-License-Identifier: MIT

//! Shared error kinds propagated from core outward to the transport.

use crate::job::Status;
use thiserror::Error;

/// Error kinds named in the error handling design: `Validation`,
/// `NotFound`, `InvalidTransition`, `Store`, `Execution`, `Planning`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },

    #[error("store error: {0}")]
    Store(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("planning error: {0}")]
    Planning(String),
}

impl CoreError {
    /// Conventional HTTP status code for this error kind, per the error
    /// handling design (§7).
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::Validation(_) => 400,
            CoreError::InvalidTransition { .. } => 400,
            CoreError::NotFound(_) => 404,
            CoreError::Store(_) => 500,
            CoreError::Execution(_) => 500,
            CoreError::Planning(_) => 500,
        }
    }
}
