//! Event Model
//!
//! One record per calendar month, keyed by `month_key` (`"YYYY-MM"`).
//! The pricing snapshot is fixed at creation time so later changes to
//! the global defaults never alter an already-created event.

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Event lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Published,
    SoldOut,
    Cancelled,
    Completed,
}

/// Per-event pricing snapshot (integer pence)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventPricing {
    pub seat_price_pence: i64,
    pub corkage_fee_pence: i64,
}

/// Venue details, filled in by admins after the draft is created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventVenue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
}

/// Monthly supper-club event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Period key, e.g. "2026-02" - unique per month
    pub month_key: String,
    /// Event start instant (last Saturday of the month, 18:30 local)
    pub date_time: DateTime<Utc>,
    pub capacity: u32,
    #[serde(default)]
    pub seats_booked: u32,
    pub pricing: EventPricing,
    pub status: EventStatus,
    #[serde(default)]
    pub venue: EventVenue,
    /// Menu item ids shown for this event
    #[serde(default)]
    pub menu: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Update event payload (admin edits; `month_key`, `pricing` and
/// `seats_booked` are deliberately absent - identity and snapshot are
/// immutable, the seat counter only moves through atomic increments)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<EventVenue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<String>>,
}
