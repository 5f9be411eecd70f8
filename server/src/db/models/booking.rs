//! Booking Model

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Payment lifecycle, driven by the checkout webhook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Failed,
}

/// One meal choice per seat: exactly one starter, one-or-more mains
/// (buffet style), one dessert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSelection {
    pub starter: String,
    pub mains: Vec<String>,
    pub dessert: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
}

/// Drink add-on line, priced from the AddOn record at checkout time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAddOn {
    #[serde(with = "serde_id")]
    pub add_on: RecordId,
    pub name: String,
    pub quantity: u32,
    pub unit_price_pence: i64,
}

/// Applied discount line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDiscount {
    #[serde(with = "serde_id")]
    pub discount: RecordId,
    pub code: String,
    pub amount_pence: i64,
}

/// Seat booking for a monthly event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_name: String,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    #[serde(with = "serde_id")]
    pub event: RecordId,
    pub seats: u32,
    /// Bring-your-own bottles; adds per-seat corkage to the subtotal
    #[serde(default)]
    pub byob: bool,
    #[serde(default)]
    pub add_ons: Vec<BookingAddOn>,
    #[serde(default)]
    pub discounts: Vec<BookingDiscount>,
    pub subtotal_pence: i64,
    pub discount_total_pence: i64,
    pub total_pence: i64,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_session_id: Option<String>,
    /// Human-usable reference, "JB-" + 8 chars, unique
    pub booking_code: String,
    #[serde(default)]
    pub attended: bool,
    /// One selection per seat
    pub meal_selections: Vec<MealSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
