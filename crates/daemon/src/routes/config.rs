// SPDX-License-Identifier: MIT

//! `/api/config` routes: full read, and the field-presence PATCH merge.

use crate::app_state::AppState;
use crate::error::ApiError;
use axum::extract::State;
use axum::Json;
use ralph_core::ServerConfig;
use ralph_storage::ConfigRepo;
use serde_json::Value;

pub async fn get(State(state): State<AppState>) -> Result<Json<ServerConfig>, ApiError> {
    Ok(Json(ConfigRepo::new(&state.store).get()?))
}

pub async fn patch(State(state): State<AppState>, Json(patch): Json<Value>) -> Result<Json<ServerConfig>, ApiError> {
    Ok(Json(ConfigRepo::new(&state.store).apply_patch(&patch)?))
}
