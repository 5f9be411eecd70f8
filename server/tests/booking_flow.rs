//! End-to-end booking flow against the in-memory database:
//! materialize the month, publish, take a discounted booking through
//! payment confirmation, and watch the event fill up.
//! Run: cargo test -p supperclub-server --test booking_flow

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Europe::London;
use server::db::DbService;
use server::db::models::{
    Booking, DiscountCreate, DiscountKind, EventStatus, EventUpdate, MealSelection, PaymentStatus,
};
use server::db::repository::{BookingRepository, DiscountRepository, EventRepository};
use server::discounts::DiscountValidator;
use server::domain::{PricingConfig, codes, pricing};
use server::events::EventMaterializer;
use server::payments::{
    CHECKOUT_COMPLETED, CheckoutEvent, WebhookOutcome, WebhookProcessor,
};

fn meal() -> MealSelection {
    MealSelection {
        starter: "Burrata".to_string(),
        mains: vec!["Short Rib".to_string(), "Gnocchi".to_string()],
        dessert: "Affogato".to_string(),
        dietary_notes: None,
    }
}

fn webhook_completed(booking_id: &str) -> CheckoutEvent {
    serde_json::from_value(serde_json::json!({
        "type": CHECKOUT_COMPLETED,
        "data": {
            "object": {
                "id": "cs_flow_1",
                "metadata": { "booking_id": booking_id }
            }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn booking_lifecycle_from_draft_month_to_paid_seats() {
    let db = DbService::memory().await.unwrap();
    let events = EventRepository::new(db.db.clone());
    let bookings = BookingRepository::new(db.db.clone());
    let discounts = DiscountRepository::new(db.db.clone());

    // 1. The scheduler tick creates February's draft
    let materializer =
        EventMaterializer::new(events.clone(), 10, PricingConfig::default());
    let first_of_feb = London.with_ymd_and_hms(2026, 2, 1, 0, 0, 5).unwrap();
    assert!(materializer.ensure_monthly_event(first_of_feb).await.unwrap());

    let draft = events.find_by_month_key("2026-02").await.unwrap().unwrap();
    assert_eq!(draft.status, EventStatus::Draft);
    assert_eq!(
        draft.date_time,
        Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap()
    );
    let event_id = draft.id.clone().unwrap();

    // 2. Admin publishes it
    let published = events
        .update(
            &event_id.to_string(),
            EventUpdate {
                status: Some(EventStatus::Published),
                capacity: None,
                venue: None,
                menu: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(published.status, EventStatus::Published);

    // 3. A four-seat booking with a 10% code
    discounts
        .create(DiscountCreate {
            code: "SUPPER10".to_string(),
            kind: DiscountKind::Percentage,
            scope: Default::default(),
            value: 10,
            min_seats: Some(4),
            max_uses: Some(5),
            valid_from: Utc::now() - Duration::days(1),
            valid_until: Utc::now() + Duration::days(60),
            active: Some(true),
        })
        .await
        .unwrap();

    let seats = 4u32;
    let event_pricing = PricingConfig {
        seat_price_pence: draft.pricing.seat_price_pence,
        corkage_fee_pence: draft.pricing.corkage_fee_pence,
    };
    let subtotal = pricing::seats_subtotal(&event_pricing, seats);
    let applied = DiscountValidator::new(discounts.clone())
        .validate("SUPPER10", seats, subtotal, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(applied.amount_pence, 1000);

    let total = pricing::booking_total(subtotal, applied.amount_pence);
    let booking = bookings
        .create(Booking {
            id: None,
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            user_phone: None,
            event: event_id.clone(),
            seats,
            byob: false,
            add_ons: vec![],
            discounts: vec![],
            subtotal_pence: subtotal,
            discount_total_pence: applied.amount_pence,
            total_pence: total,
            payment_status: PaymentStatus::Pending,
            checkout_session_id: Some("cs_flow_1".to_string()),
            booking_code: codes::booking_code(),
            attended: false,
            meal_selections: vec![meal(); seats as usize],
            dietary_notes: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    assert_eq!(booking.total_pence, 9000);

    // Seats are not on the event until payment confirms
    let before = events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
    assert_eq!(before.seats_booked, 0);

    // 4. Webhook confirms payment; redelivery changes nothing
    let processor = WebhookProcessor::new(
        bookings.clone(),
        server::db::repository::GiftTicketRepository::new(db.db.clone()),
        events.clone(),
    );
    let booking_ref = booking.id.clone().unwrap().to_string();

    let outcome = processor.process(webhook_completed(&booking_ref)).await.unwrap();
    assert!(matches!(outcome, WebhookOutcome::BookingPaid { .. }));
    let outcome = processor.process(webhook_completed(&booking_ref)).await.unwrap();
    assert_eq!(outcome, WebhookOutcome::Ignored);

    let after = events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
    assert_eq!(after.seats_booked, 4);
    assert_eq!(after.status, EventStatus::Published);

    let paid = bookings.find_by_code(&booking.booking_code).await.unwrap().unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    // 5. Filling the remaining capacity flips the event to SOLD_OUT
    events.add_seats(&event_id, 6).await.unwrap();
    let full = events.find_by_id(&event_id.to_string()).await.unwrap().unwrap();
    assert_eq!(full.seats_booked, 10);
    assert_eq!(full.status, EventStatus::SoldOut);
}
