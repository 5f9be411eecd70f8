//! Health API Handlers

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

/// GET /api/health - liveness probe
pub async fn health(State(state): State<Arc<ServerState>>) -> Json<AppResponse<Value>> {
    ok(json!({
        "status": "ok",
        "environment": state.config.environment,
    }))
}
