//! Gift Ticket API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{GiftTicket, GiftTicketStatus, PaymentStatus};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub code: String,
}

/// GET /api/gifts/lookup?code= - shown at the door before redeeming
pub async fn lookup(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<AppResponse<GiftTicket>>> {
    let ticket = state
        .gift_tickets()
        .find_by_code(&query.code)
        .await?
        .ok_or_else(|| AppError::not_found("Gift ticket not found"))?;
    Ok(ok(ticket))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RedeemRequest {
    #[validate(length(min = 1, message = "Redeemer name is required"))]
    pub redeemed_by: String,
}

/// POST /api/gifts/:code/redeem
///
/// The seat was booked onto the event when payment confirmed; this only
/// marks the ticket used and records who turned up with it.
pub async fn redeem(
    State(state): State<Arc<ServerState>>,
    Path(code): Path<String>,
    Json(payload): Json<RedeemRequest>,
) -> AppResult<Json<AppResponse<GiftTicket>>> {
    payload.validate()?;

    let ticket = state
        .gift_tickets()
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Gift ticket not found"))?;
    let id = ticket
        .id
        .clone()
        .ok_or_else(|| AppError::database("Gift ticket record has no id"))?;

    match state.gift_tickets().redeem(&id, &payload.redeemed_by).await? {
        Some(redeemed) => Ok(ok_with_message(redeemed, "Gift ticket redeemed")),
        // The conditional update refused; read the record to say why
        None => {
            let current = state
                .gift_tickets()
                .find_by_id(&id.to_string())
                .await?
                .ok_or_else(|| AppError::not_found("Gift ticket not found"))?;
            let reason = if current.payment_status != PaymentStatus::Paid {
                "Gift ticket has not been paid for"
            } else {
                match current.status {
                    GiftTicketStatus::Redeemed => "Gift ticket has already been redeemed",
                    GiftTicketStatus::Expired => "Gift ticket has expired",
                    _ => "Gift ticket cannot be redeemed",
                }
            };
            Err(AppError::business_rule(reason))
        }
    }
}
