//! Discount Validator
//!
//! Checks a code against its activation window and rules, then consumes
//! one use. The window and rule checks read the record, but the usage
//! increment is the repository's conditional update, so a lost race
//! surfaces here as a usage-limit refusal rather than an overshoot.

use crate::db::models::{Discount, DiscountKind};
use crate::db::repository::{DiscountRepository, RepoError, RepoResult};
use crate::domain::pricing;
use crate::utils::time::format_pence;
use chrono::{DateTime, Utc};
use surrealdb::RecordId;

/// Why a code was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountRefusal {
    InvalidCode,
    Expired,
    UsageLimitReached,
    MinimumSeatsNotMet { min_seats: u32 },
}

impl DiscountRefusal {
    /// Customer-facing message
    pub fn message(&self) -> String {
        match self {
            DiscountRefusal::InvalidCode => "Invalid discount code.".to_string(),
            DiscountRefusal::Expired => "Discount code has expired.".to_string(),
            DiscountRefusal::UsageLimitReached => {
                "Discount code has reached its usage limit.".to_string()
            }
            DiscountRefusal::MinimumSeatsNotMet { min_seats } => {
                format!("Minimum {} seats required for this discount.", min_seats)
            }
        }
    }
}

/// A successfully applied discount, ready to attach to a booking
#[derive(Debug, Clone)]
pub struct AppliedDiscount {
    pub discount: RecordId,
    pub code: String,
    pub amount_pence: i64,
    pub message: String,
}

#[derive(Clone)]
pub struct DiscountValidator {
    repo: DiscountRepository,
}

impl DiscountValidator {
    pub fn new(repo: DiscountRepository) -> Self {
        Self { repo }
    }

    /// Validate `code` for a booking of `seats` seats at `subtotal_pence`.
    ///
    /// The outer error is infrastructure failure; the inner `Result`
    /// distinguishes an applied discount from a refusal with a message.
    pub async fn validate(
        &self,
        code: &str,
        seats: u32,
        subtotal_pence: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<Result<AppliedDiscount, DiscountRefusal>> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Ok(Err(DiscountRefusal::InvalidCode));
        }

        let Some(discount) = self.repo.find_active_by_code(&normalized).await? else {
            return Ok(Err(DiscountRefusal::InvalidCode));
        };

        if let Err(refusal) = check_rules(&discount, seats, now) {
            return Ok(Err(refusal));
        }

        let id = discount
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Discount record has no id".to_string()))?;

        // Consume a use; losing the race to the last slot reads the same
        // as having hit the limit up front
        let Some(redeemed) = self.repo.redeem(&id).await? else {
            return Ok(Err(DiscountRefusal::UsageLimitReached));
        };

        let amount_pence =
            pricing::discount_amount(redeemed.kind, redeemed.value, subtotal_pence);
        let message = applied_message(&redeemed);

        Ok(Ok(AppliedDiscount {
            discount: id,
            code: redeemed.code,
            amount_pence,
            message,
        }))
    }
}

fn check_rules(discount: &Discount, seats: u32, now: DateTime<Utc>) -> Result<(), DiscountRefusal> {
    // Half-open window: live at valid_from, dead at valid_until
    if now < discount.valid_from || now >= discount.valid_until {
        return Err(DiscountRefusal::Expired);
    }
    if let Some(max_uses) = discount.rules.max_uses {
        if discount.rules.current_uses >= max_uses {
            return Err(DiscountRefusal::UsageLimitReached);
        }
    }
    if let Some(min_seats) = discount.rules.min_seats {
        if seats < min_seats {
            return Err(DiscountRefusal::MinimumSeatsNotMet { min_seats });
        }
    }
    Ok(())
}

fn applied_message(discount: &Discount) -> String {
    match discount.kind {
        DiscountKind::Percentage => {
            format!("Discount applied: {}% off", discount.value)
        }
        DiscountKind::Fixed => {
            format!("Discount applied: {} off", format_pence(discount.value))
        }
    }
}
