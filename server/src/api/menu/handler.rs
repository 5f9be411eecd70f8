//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/menu - active dishes, the customer-facing menu
pub async fn list_active(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    let items = state.menu_items().find_active().await?;
    Ok(ok(items))
}

/// GET /api/menu/all - every dish including retired ones
pub async fn list_all(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    let items = state.menu_items().find_all().await?;
    Ok(ok(items))
}

/// POST /api/menu
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let item = state.menu_items().create(payload).await?;
    Ok(ok(item))
}

/// PUT /api/menu/:id
pub async fn update(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let item = state.menu_items().update(&id, payload).await?;
    Ok(ok(item))
}

/// DELETE /api/menu/:id
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let result = state.menu_items().delete(&id).await?;
    Ok(ok(result))
}
