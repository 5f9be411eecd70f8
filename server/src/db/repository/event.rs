//! Event Repository

use super::{BaseRepository, RepoError, RepoResult, is_unique_index_violation, record_key};
use crate::db::models::{Event, EventUpdate};
use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "event";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All events, most recent first
    pub async fn find_all(&self) -> RepoResult<Vec<Event>> {
        let events: Vec<Event> = self
            .base
            .db()
            .query("SELECT * FROM event ORDER BY date_time DESC")
            .await?
            .take(0)?;
        Ok(events)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        let event: Option<Event> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(event)
    }

    /// At most one record exists per month key (unique index)
    pub async fn find_by_month_key(&self, month_key: &str) -> RepoResult<Option<Event>> {
        let key_owned = month_key.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM event WHERE month_key = $key LIMIT 1")
            .bind(("key", key_owned))
            .await?;
        let events: Vec<Event> = result.take(0)?;
        Ok(events.into_iter().next())
    }

    /// Published events that have not started yet, soonest first
    pub async fn find_upcoming(&self, now: DateTime<Utc>) -> RepoResult<Vec<Event>> {
        let events: Vec<Event> = self
            .base
            .db()
            .query(
                "SELECT * FROM event \
                 WHERE status IN ['PUBLISHED', 'SOLD_OUT'] AND date_time > $now \
                 ORDER BY date_time ASC",
            )
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Insert a new event unless one already exists for its month key.
    ///
    /// The unique index on `month_key` makes this safe under concurrent
    /// invocation: the loser of the race gets `Ok(None)`, same as if the
    /// record had existed all along.
    pub async fn create_if_absent(&self, event: Event) -> RepoResult<Option<Event>> {
        let month_key = event.month_key.clone();
        match self.base.db().create(TABLE).content(event).await {
            Ok(created) => Ok(created),
            Err(e) if is_unique_index_violation(&e) => {
                tracing::debug!(month_key = %month_key, "Event already exists, skipping create");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Admin update of lifecycle fields; identity and pricing snapshot
    /// are not touchable through this path
    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<Event> {
        let key = record_key(TABLE, id);
        let updated: Option<Event> = self
            .base
            .db()
            .update((TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    /// Atomically add booked seats, flipping to SOLD_OUT when capacity
    /// is reached
    pub async fn add_seats(&self, id: &RecordId, seats: u32) -> RepoResult<Option<Event>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPDATE $id SET seats_booked += $seats;
                UPDATE $id SET status = 'SOLD_OUT'
                    WHERE seats_booked >= capacity AND status = 'PUBLISHED';
                SELECT * FROM $id;
                "#,
            )
            .bind(("id", id.clone()))
            .bind(("seats", seats))
            .await?;
        let events: Vec<Event> = result.take(2)?;
        Ok(events.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{EventPricing, EventStatus, EventVenue};
    use chrono::TimeZone;

    fn draft_event(month_key: &str) -> Event {
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
    async fn create_if_absent_is_idempotent_per_month_key() {
        let db = DbService::memory().await.unwrap();
        let repo = EventRepository::new(db.db.clone());

        let first = repo.create_if_absent(draft_event("2026-02")).await.unwrap();
        assert!(first.is_some());

        let second = repo.create_if_absent(draft_event("2026-02")).await.unwrap();
        assert!(second.is_none());

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn add_seats_flips_to_sold_out_at_capacity() {
        let db = DbService::memory().await.unwrap();
        let repo = EventRepository::new(db.db.clone());

        let mut event = draft_event("2026-03");
        event.capacity = 2;
        event.status = EventStatus::Published;
        let created = repo.create_if_absent(event).await.unwrap().unwrap();
        let id = created.id.unwrap();

        let after_one = repo.add_seats(&id, 1).await.unwrap().unwrap();
        assert_eq!(after_one.seats_booked, 1);
        assert_eq!(after_one.status, EventStatus::Published);

        let after_two = repo.add_seats(&id, 1).await.unwrap().unwrap();
        assert_eq!(after_two.seats_booked, 2);
        assert_eq!(after_two.status, EventStatus::SoldOut);
    }
}
