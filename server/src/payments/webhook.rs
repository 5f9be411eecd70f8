//! Checkout Webhook Processing
//!
//! Payment confirmation is the only thing that books seats onto an
//! event. The conditional PENDING-to-PAID transition in the repository
//! gates the seat increment, so a redelivered webhook can never count
//! the same seats twice.

use crate::db::models::PaymentStatus;
use crate::db::repository::{
    BookingRepository, EventRepository, GiftTicketRepository, RepoResult,
};
use serde::Deserialize;
use std::collections::HashMap;
use surrealdb::RecordId;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const CHECKOUT_EXPIRED: &str = "checkout.session.expired";

/// Provider webhook envelope, trimmed to the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: CheckoutEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutEventData {
    pub object: CheckoutSessionObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// What a webhook delivery did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    BookingPaid { booking_code: String },
    GiftTicketPaid { code: String },
    BookingExpired,
    GiftTicketExpired,
    /// Unknown event type, missing record, or a duplicate delivery
    Ignored,
}

#[derive(Clone)]
pub struct WebhookProcessor {
    bookings: BookingRepository,
    gifts: GiftTicketRepository,
    events: EventRepository,
}

impl WebhookProcessor {
    pub fn new(
        bookings: BookingRepository,
        gifts: GiftTicketRepository,
        events: EventRepository,
    ) -> Self {
        Self {
            bookings,
            gifts,
            events,
        }
    }

    pub async fn process(&self, event: CheckoutEvent) -> RepoResult<WebhookOutcome> {
        match event.event_type.as_str() {
            CHECKOUT_COMPLETED => self.handle_completed(&event.data.object).await,
            CHECKOUT_EXPIRED => self.handle_expired(&event.data.object).await,
            other => {
                tracing::debug!(event_type = %other, "Ignoring webhook event type");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }

    async fn handle_completed(&self, session: &CheckoutSessionObject) -> RepoResult<WebhookOutcome> {
        if let Some(id) = self.booking_id(session).await? {
            let Some(paid) = self
                .bookings
                .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Paid)
                .await?
            else {
                tracing::info!(session_id = %session.id, "Booking already paid, duplicate delivery");
                return Ok(WebhookOutcome::Ignored);
            };
            // Seats join the event only on the first transition
            self.events.add_seats(&paid.event, paid.seats).await?;
            tracing::info!(booking_code = %paid.booking_code, seats = paid.seats, "Booking paid");
            return Ok(WebhookOutcome::BookingPaid {
                booking_code: paid.booking_code,
            });
        }

        if let Some(id) = self.gift_id(session).await? {
            let Some(paid) = self
                .gifts
                .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Paid)
                .await?
            else {
                tracing::info!(session_id = %session.id, "Gift ticket already paid, duplicate delivery");
                return Ok(WebhookOutcome::Ignored);
            };
            self.events.add_seats(&paid.event, paid.seats).await?;
            tracing::info!(code = %paid.code, "Gift ticket paid");
            return Ok(WebhookOutcome::GiftTicketPaid { code: paid.code });
        }

        tracing::warn!(session_id = %session.id, "Completed session matches no record");
        Ok(WebhookOutcome::Ignored)
    }

    async fn handle_expired(&self, session: &CheckoutSessionObject) -> RepoResult<WebhookOutcome> {
        if let Some(id) = self.booking_id(session).await? {
            let failed = self
                .bookings
                .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Failed)
                .await?;
            return Ok(match failed {
                Some(_) => WebhookOutcome::BookingExpired,
                None => WebhookOutcome::Ignored,
            });
        }
        if let Some(id) = self.gift_id(session).await? {
            let failed = self
                .gifts
                .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Failed)
                .await?;
            return Ok(match failed {
                Some(_) => WebhookOutcome::GiftTicketExpired,
                None => WebhookOutcome::Ignored,
            });
        }
        Ok(WebhookOutcome::Ignored)
    }

    /// Booking record id from metadata, falling back to the stored
    /// session id for deliveries with stripped metadata
    async fn booking_id(&self, session: &CheckoutSessionObject) -> RepoResult<Option<RecordId>> {
        if let Some(raw) = session.metadata.get("booking_id") {
            if let Ok(id) = raw.parse::<RecordId>() {
                return Ok(Some(id));
            }
        }
        if session.metadata.contains_key("gift_ticket_id") {
            return Ok(None);
        }
        Ok(self
            .bookings
            .find_by_session(&session.id)
            .await?
            .and_then(|b| b.id))
    }

    async fn gift_id(&self, session: &CheckoutSessionObject) -> RepoResult<Option<RecordId>> {
        if let Some(raw) = session.metadata.get("gift_ticket_id") {
            if let Ok(id) = raw.parse::<RecordId>() {
                return Ok(Some(id));
            }
        }
        Ok(self
            .gifts
            .find_by_session(&session.id)
            .await?
            .and_then(|t| t.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{
        Booking, Event, EventPricing, EventStatus, EventVenue, MealSelection,
    };
    use chrono::{TimeZone, Utc};

    struct Fixture {
        processor: WebhookProcessor,
        events: EventRepository,
        bookings: BookingRepository,
    }

    async fn fixture() -> Fixture {
        let db = DbService::memory().await.unwrap();
        Fixture {
            processor: WebhookProcessor::new(
                BookingRepository::new(db.db.clone()),
                GiftTicketRepository::new(db.db.clone()),
                EventRepository::new(db.db.clone()),
            ),
            events: EventRepository::new(db.db.clone()),
            bookings: BookingRepository::new(db.db.clone()),
        }
    }

    async fn seed_event(events: &EventRepository) -> RecordId {
        let event = Event {
            id: None,
            month_key: "2026-02".to_string(),
            date_time: Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap(),
            capacity: 30,
            seats_booked: 0,
            pricing: EventPricing {
                seat_price_pence: 2500,
                corkage_fee_pence: 200,
            },
            status: EventStatus::Published,
            venue: EventVenue::default(),
            menu: vec![],
            created_at: Utc::now(),
        };
        events.create_if_absent(event).await.unwrap().unwrap().id.unwrap()
    }

    async fn seed_booking(bookings: &BookingRepository, event: RecordId, seats: u32) -> Booking {
        bookings
            .create(Booking {
                id: None,
                user_name: "Ada".to_string(),
                user_email: "ada@example.com".to_string(),
                user_phone: None,
                event,
                seats,
                byob: false,
                add_ons: vec![],
                discounts: vec![],
                subtotal_pence: 2500 * seats as i64,
                discount_total_pence: 0,
                total_pence: 2500 * seats as i64,
                payment_status: PaymentStatus::Pending,
                checkout_session_id: Some("cs_test_1".to_string()),
                booking_code: "JB-WEBHOOK1".to_string(),
                attended: false,
                meal_selections: vec![
                    MealSelection {
                        starter: "Soup".to_string(),
                        mains: vec!["Tagine".to_string()],
                        dessert: "Baklava".to_string(),
                        dietary_notes: None,
                    };
                    seats as usize
                ],
                dietary_notes: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap()
    }

    fn completed_event(session_id: &str, metadata: &[(&str, &str)]) -> CheckoutEvent {
        CheckoutEvent {
            event_type: CHECKOUT_COMPLETED.to_string(),
            data: CheckoutEventData {
                object: CheckoutSessionObject {
                    id: session_id.to_string(),
                    metadata: metadata
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
            },
        }
    }

    #[tokio::test]
    async fn duplicate_completed_delivery_books_seats_exactly_once() {
        let f = fixture().await;
        let event_id = seed_event(&f.events).await;
        let booking = seed_booking(&f.bookings, event_id.clone(), 3).await;
        let booking_ref = booking.id.unwrap().to_string();

        let delivery = completed_event("cs_test_1", &[("booking_id", booking_ref.as_str())]);

        let first = f.processor.process(delivery.clone()).await.unwrap();
        assert_eq!(
            first,
            WebhookOutcome::BookingPaid {
                booking_code: "JB-WEBHOOK1".to_string()
            }
        );

        let second = f.processor.process(delivery).await.unwrap();
        assert_eq!(second, WebhookOutcome::Ignored);

        let after = f.events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
        assert_eq!(after.seats_booked, 3);
    }

    #[tokio::test]
    async fn completed_delivery_without_metadata_resolves_by_session_id() {
        let f = fixture().await;
        let event_id = seed_event(&f.events).await;
        seed_booking(&f.bookings, event_id.clone(), 2).await;

        let outcome = f
            .processor
            .process(completed_event("cs_test_1", &[]))
            .await
            .unwrap();
        assert!(matches!(outcome, WebhookOutcome::BookingPaid { .. }));

        let after = f.events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
        assert_eq!(after.seats_booked, 2);
    }

    #[tokio::test]
    async fn expired_session_fails_the_booking_without_touching_seats() {
        let f = fixture().await;
        let event_id = seed_event(&f.events).await;
        let booking = seed_booking(&f.bookings, event_id.clone(), 2).await;
        let booking_ref = booking.id.clone().unwrap().to_string();

        let mut delivery = completed_event("cs_test_1", &[("booking_id", booking_ref.as_str())]);
        delivery.event_type = CHECKOUT_EXPIRED.to_string();

        let outcome = f.processor.process(delivery).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::BookingExpired);

        let after_booking = f
            .bookings
            .find_by_id(&booking.id.unwrap().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_booking.payment_status, PaymentStatus::Failed);

        let after_event = f.events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
        assert_eq!(after_event.seats_booked, 0);
    }

    #[tokio::test]
    async fn unknown_event_types_are_ignored() {
        let f = fixture().await;
        let mut delivery = completed_event("cs_test_x", &[]);
        delivery.event_type = "invoice.created".to_string();
        assert_eq!(
            f.processor.process(delivery).await.unwrap(),
            WebhookOutcome::Ignored
        );
    }
}
