//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::Booking;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub code: String,
}

/// GET /api/bookings/lookup?code= - find a booking by its reference
pub async fn lookup(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let booking = state
        .bookings()
        .find_by_code(&query.code)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;
    Ok(ok(booking))
}

/// GET /api/bookings/event/:event_id - door list for a dinner
pub async fn list_for_event(
    State(state): State<Arc<ServerState>>,
    Path(event_id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Booking>>>> {
    let event = state
        .events()
        .find_by_id(&event_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", event_id)))?;
    let id = event
        .id
        .ok_or_else(|| AppError::database("Event record has no id"))?;
    let bookings = state.bookings().find_for_event(&id).await?;
    Ok(ok(bookings))
}

#[derive(Debug, Deserialize)]
pub struct AttendedRequest {
    pub attended: bool,
}

/// POST /api/bookings/:id/attended - tick guests off at the door
pub async fn set_attended(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<AttendedRequest>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let booking = state.bookings().set_attended(&id, payload.attended).await?;
    Ok(ok(booking))
}
