//! Gallery API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::{GalleryItem, GalleryItemCreate};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/gallery - newest first
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<GalleryItem>>>> {
    let items = state.gallery().find_all().await?;
    Ok(ok(items))
}

/// POST /api/gallery
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<GalleryItemCreate>,
) -> AppResult<Json<AppResponse<GalleryItem>>> {
    let item = state.gallery().create(payload).await?;
    Ok(ok(item))
}

/// DELETE /api/gallery/:id
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let result = state.gallery().delete(&id).await?;
    Ok(ok(result))
}
