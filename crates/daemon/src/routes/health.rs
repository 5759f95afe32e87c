// SPDX-License-Identifier: MIT

use axum::Json;
use ralph_wire::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
