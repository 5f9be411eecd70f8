//! Webhook API Handlers

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::ServerState;
use crate::payments::{CheckoutEvent, WebhookOutcome};
use crate::utils::{AppResponse, AppResult, ok};

/// POST /api/webhooks/checkout - payment provider callback.
///
/// Always answers 200 for deliveries we understand, including
/// duplicates; the provider retries anything else.
pub async fn checkout(
    State(state): State<Arc<ServerState>>,
    Json(event): Json<CheckoutEvent>,
) -> AppResult<Json<AppResponse<Value>>> {
    let outcome = state.webhook_processor().process(event).await?;
    let received = match outcome {
        WebhookOutcome::BookingPaid { booking_code } => {
            json!({ "received": true, "booking_code": booking_code })
        }
        WebhookOutcome::GiftTicketPaid { code } => {
            json!({ "received": true, "gift_code": code })
        }
        WebhookOutcome::BookingExpired
        | WebhookOutcome::GiftTicketExpired
        | WebhookOutcome::Ignored => json!({ "received": true }),
    };
    Ok(ok(received))
}
