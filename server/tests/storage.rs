//! On-disk storage smoke test: the RocksDB engine applies the same
//! unique indexes the in-memory tests rely on.
//! Run: cargo test -p supperclub-server --test storage

use chrono::{TimeZone, Utc};
use server::db::DbService;
use server::db::models::{Event, EventPricing, EventStatus, EventVenue};
use server::db::repository::EventRepository;

fn event(month_key: &str) -> Event {
    Event {
        id: None,
        month_key: month_key.to_string(),
        date_time: Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap(),
        capacity: 30,
        seats_booked: 0,
        pricing: EventPricing {
            seat_price_pence: 2500,
            corkage_fee_pence: 200,
        },
        status: EventStatus::Draft,
        venue: EventVenue::default(),
        menu: vec![],
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn rocksdb_engine_enforces_the_month_key_index() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path().to_str().unwrap()).await.unwrap();
    let events = EventRepository::new(db.db.clone());

    assert!(events.create_if_absent(event("2026-02")).await.unwrap().is_some());
    assert!(events.create_if_absent(event("2026-02")).await.unwrap().is_none());
    assert_eq!(events.find_all().await.unwrap().len(), 1);
}
