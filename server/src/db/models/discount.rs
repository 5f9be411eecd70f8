//! Discount Model

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Discount kind: percentage of subtotal or a fixed pence amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Discount scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountScope {
    #[default]
    Promo,
    Bundle,
}

/// Redemption rules
///
/// Invariant: `current_uses` never exceeds `max_uses` after a successful
/// validation - the usage increment is a single conditional update, see
/// `DiscountRepository::redeem`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub current_uses: u32,
}

/// Discount code entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Stored uppercase; lookups normalize before matching
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[serde(default)]
    pub scope: DiscountScope,
    /// Percentage 0-100 for PERCENTAGE, pence amount for FIXED
    pub value: i64,
    #[serde(default)]
    pub rules: DiscountRules,
    /// Activation window, half-open: [valid_from, valid_until)
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[serde(default)]
    pub scope: DiscountScope,
    pub value: i64,
    pub min_seats: Option<u32>,
    pub max_uses: Option<u32>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub active: Option<bool>,
}

/// Update discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiscountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<DiscountScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
