//! Discount API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Discount, DiscountCreate, DiscountUpdate};
use crate::domain::pricing;
use crate::utils::time::now_utc;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/discounts - admin list, newest first
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<Discount>>>> {
    let discounts = state.discounts().find_all().await?;
    Ok(ok(discounts))
}

/// POST /api/discounts
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<DiscountCreate>,
) -> AppResult<Json<AppResponse<Discount>>> {
    let discount = state.discounts().create(payload).await?;
    Ok(ok(discount))
}

/// PUT /api/discounts/:id
pub async fn update(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<DiscountUpdate>,
) -> AppResult<Json<AppResponse<Discount>>> {
    let discount = state.discounts().update(&id, payload).await?;
    Ok(ok(discount))
}

/// DELETE /api/discounts/:id
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let result = state.discounts().delete(&id).await?;
    Ok(ok(result))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateRequest {
    #[validate(length(min = 1, message = "Discount code is required"))]
    pub code: String,
    #[validate(range(min = 1, message = "At least one seat is required"))]
    pub seats: u32,
    /// Pence subtotal the discount applies to; defaults to seats at the
    /// configured seat price
    pub subtotal_pence: Option<i64>,
}

/// Outcome shape shown on the booking form
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub discount_pence: i64,
    pub message: String,
}

/// POST /api/discounts/validate - check a code and consume a use.
///
/// A successful validation counts against the usage cap immediately, so
/// the quote a customer sees is one they can always complete.
pub async fn validate(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<ValidateRequest>,
) -> AppResult<Json<AppResponse<ValidateResponse>>> {
    payload.validate()?;

    let subtotal = payload
        .subtotal_pence
        .unwrap_or_else(|| pricing::seats_subtotal(&state.config.pricing, payload.seats));

    let outcome = state
        .discount_validator()
        .validate(&payload.code, payload.seats, subtotal, now_utc())
        .await?;

    let response = match outcome {
        Ok(applied) => ValidateResponse {
            valid: true,
            discount_pence: applied.amount_pence,
            message: applied.message,
        },
        Err(refusal) => ValidateResponse {
            valid: false,
            discount_pence: 0,
            message: refusal.message(),
        },
    };
    Ok(ok(response))
}
