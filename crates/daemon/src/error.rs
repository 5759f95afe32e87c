// SPDX-License-Identifier: MIT

//! Maps `CoreError` onto the HTTP error envelope (§7).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ralph_core::CoreError;
use ralph_wire::ErrorResponse;

pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl From<ralph_storage::StorageError> for ApiError {
    fn from(err: ralph_storage::StorageError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
