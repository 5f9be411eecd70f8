//! Broadcast API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::{Broadcast, BroadcastCreate};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/broadcasts
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<Broadcast>>>> {
    let broadcasts = state.broadcasts().find_all().await?;
    Ok(ok(broadcasts))
}

/// POST /api/broadcasts - record an announcement for delivery
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<BroadcastCreate>,
) -> AppResult<Json<AppResponse<Broadcast>>> {
    let broadcast = state.broadcasts().create(payload).await?;
    Ok(ok(broadcast))
}

#[derive(Debug, Deserialize)]
pub struct MarkSentRequest {
    pub recipient_count: u32,
}

/// POST /api/broadcasts/:id/sent - delivery collaborator reports back
pub async fn mark_sent(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<MarkSentRequest>,
) -> AppResult<Json<AppResponse<Broadcast>>> {
    let broadcast = state
        .broadcasts()
        .mark_sent(&id, payload.recipient_count)
        .await?;
    Ok(ok(broadcast))
}
