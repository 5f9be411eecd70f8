//! Gift Ticket Model
//!
//! A gift ticket is a prepaid single seat. Purchase books the seat onto
//! the event once payment confirms; redemption only attaches the
//! recipient to it.

use super::serde_id;
use super::{MealSelection, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Gift ticket lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftTicketStatus {
    Purchased,
    Sent,
    Redeemed,
    Expired,
}

/// Prepaid gift seat for a monthly event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftTicket {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub purchaser_name: String,
    pub purchaser_email: String,
    #[serde(with = "serde_id")]
    pub event: RecordId,
    /// Human-usable reference, "GIFT-" + 6 chars, unique
    pub code: String,
    pub status: GiftTicketStatus,
    pub payment_status: PaymentStatus,
    pub recipient_name: String,
    pub recipient_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed_by: Option<String>,
    /// Always 1 in the current product; kept explicit for the totals math
    pub seats: u32,
    pub meal_selection: MealSelection,
    pub price_paid_pence: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
