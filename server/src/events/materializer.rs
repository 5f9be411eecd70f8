//! Monthly Event Materializer
//!
//! Creates the current month's draft event if it does not exist yet.
//! Runs from the scheduler on the first of each month and once at
//! startup as a catch-up; both paths are idempotent.

use crate::db::models::{Event, EventPricing, EventStatus, EventVenue};
use crate::db::repository::{EventRepository, RepoResult};
use crate::domain::PricingConfig;
use crate::domain::schedule::{self, period_key};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

#[derive(Clone)]
pub struct EventMaterializer {
    events: EventRepository,
    capacity: u32,
    pricing: PricingConfig,
}

impl EventMaterializer {
    pub fn new(events: EventRepository, capacity: u32, pricing: PricingConfig) -> Self {
        Self {
            events,
            capacity,
            pricing,
        }
    }

    /// Make sure this month's event exists. Returns whether a new draft
    /// was created.
    ///
    /// Deliberately does not roll forward: if the dinner has already
    /// started this month there is nothing left to materialize, and the
    /// next scheduler tick on the first of next month covers the future.
    pub async fn ensure_monthly_event(&self, now: DateTime<Tz>) -> RepoResult<bool> {
        let target = schedule::last_saturday_in(now.timezone(), now.year(), now.month());
        if target <= now {
            tracing::debug!(month_key = %period_key(&now), "This month's dinner already started, nothing to create");
            return Ok(false);
        }

        let month_key = period_key(&target);
        if self.events.find_by_month_key(&month_key).await?.is_some() {
            return Ok(false);
        }

        let event = Event {
            id: None,
            month_key: month_key.clone(),
            date_time: target.with_timezone(&Utc),
            capacity: self.capacity,
            seats_booked: 0,
            pricing: EventPricing {
                seat_price_pence: self.pricing.seat_price_pence,
                corkage_fee_pence: self.pricing.corkage_fee_pence,
            },
            status: EventStatus::Draft,
            venue: EventVenue::default(),
            menu: vec![],
            created_at: Utc::now(),
        };

        match self.events.create_if_absent(event).await? {
            Some(created) => {
                tracing::info!(
                    month_key = %month_key,
                    date_time = %created.date_time,
                    "Created draft event"
                );
                Ok(true)
            }
            // Lost a creation race; the event exists either way
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use chrono::TimeZone;
    use chrono_tz::Europe::London;

    fn materializer(db: &DbService) -> EventMaterializer {
        EventMaterializer::new(
            EventRepository::new(db.db.clone()),
            30,
            PricingConfig::default(),
        )
    }

    #[tokio::test]
    async fn creates_a_draft_once_per_month() {
        let db = DbService::memory().await.unwrap();
        let m = materializer(&db);
        let first_of_feb = London.with_ymd_and_hms(2026, 2, 1, 0, 0, 5).unwrap();

        assert!(m.ensure_monthly_event(first_of_feb).await.unwrap());
        // Second run is a no-op
        assert!(!m.ensure_monthly_event(first_of_feb).await.unwrap());

        let repo = EventRepository::new(db.db.clone());
        let event = repo.find_by_month_key("2026-02").await.unwrap().unwrap();
        assert_eq!(event.status, EventStatus::Draft);
        assert_eq!(event.capacity, 30);
        assert_eq!(event.pricing.seat_price_pence, 2500);
        assert_eq!(
            event.date_time,
            Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn does_nothing_once_the_dinner_has_started() {
        let db = DbService::memory().await.unwrap();
        let m = materializer(&db);
        let after_dinner = London.with_ymd_and_hms(2026, 2, 28, 20, 0, 0).unwrap();

        assert!(!m.ensure_monthly_event(after_dinner).await.unwrap());
        let repo = EventRepository::new(db.db.clone());
        assert!(repo.find_by_month_key("2026-02").await.unwrap().is_none());
    }
}
