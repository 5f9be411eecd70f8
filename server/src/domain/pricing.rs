//! Pricing Rules
//!
//! All money is integer pence. Prices come in through configuration and
//! flow through here explicitly; no module-level price constants.

use crate::db::models::{BookingAddOn, DiscountKind};
use serde::{Deserialize, Serialize};

/// Per-event price snapshot source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Per-seat dinner price
    pub seat_price_pence: i64,
    /// Per-seat corkage for bring-your-own bottles
    pub corkage_fee_pence: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            seat_price_pence: 2500,
            corkage_fee_pence: 200,
        }
    }
}

/// Seats times the per-seat price
pub fn seats_subtotal(pricing: &PricingConfig, seats: u32) -> i64 {
    pricing.seat_price_pence * seats as i64
}

/// Per-seat corkage for bring-your-own bookings, zero otherwise
pub fn corkage_total(pricing: &PricingConfig, seats: u32, byob: bool) -> i64 {
    if byob {
        pricing.corkage_fee_pence * seats as i64
    } else {
        0
    }
}

/// Sum of the drink lines, each priced at its stored unit price
pub fn add_ons_total(add_ons: &[BookingAddOn]) -> i64 {
    add_ons
        .iter()
        .map(|line| line.unit_price_pence * line.quantity as i64)
        .sum()
}

/// Pence knocked off `subtotal_pence` by a discount.
///
/// Percentage amounts round half away from zero. A FIXED amount is
/// returned verbatim even when it exceeds the subtotal; the caller
/// clamps the final total at zero via [`booking_total`].
pub fn discount_amount(kind: DiscountKind, value: i64, subtotal_pence: i64) -> i64 {
    let raw = match kind {
        DiscountKind::Percentage => (subtotal_pence * value + 50) / 100,
        DiscountKind::Fixed => value,
    };
    raw.max(0)
}

/// Final charge: subtotal minus discounts, floored at zero
pub fn booking_total(subtotal_pence: i64, discount_total_pence: i64) -> i64 {
    (subtotal_pence - discount_total_pence).max(0)
}
