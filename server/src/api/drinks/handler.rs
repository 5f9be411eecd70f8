//! Drinks API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::{AddOn, AddOnCreate, AddOnUpdate};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/drinks - active drink add-ons
pub async fn list_active(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<AddOn>>>> {
    let add_ons = state.add_ons().find_active().await?;
    Ok(ok(add_ons))
}

/// GET /api/drinks/all - every drink including delisted ones
pub async fn list_all(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<AddOn>>>> {
    let add_ons = state.add_ons().find_all().await?;
    Ok(ok(add_ons))
}

/// POST /api/drinks
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<AddOnCreate>,
) -> AppResult<Json<AppResponse<AddOn>>> {
    let add_on = state.add_ons().create(payload).await?;
    Ok(ok(add_on))
}

/// PUT /api/drinks/:id
pub async fn update(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<AddOnUpdate>,
) -> AppResult<Json<AppResponse<AddOn>>> {
    let add_on = state.add_ons().update(&id, payload).await?;
    Ok(ok(add_on))
}

/// DELETE /api/drinks/:id
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let result = state.add_ons().delete(&id).await?;
    Ok(ok(result))
}
