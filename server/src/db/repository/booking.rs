//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult, is_unique_index_violation, record_key};
use crate::db::models::{Booking, PaymentStatus};
use crate::domain::codes;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "booking";

/// Attempts before giving up on a reference-code collision. With a
/// 32-character alphabet and 8 positions a single collision is already
/// vanishingly rare.
const CODE_RETRIES: usize = 4;

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let booking: Option<Booking> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(booking)
    }

    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Booking>> {
        let code_owned = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE booking_code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Option<Booking>> {
        let session_owned = session_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE checkout_session_id = $session_id LIMIT 1")
            .bind(("session_id", session_owned))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    pub async fn find_for_event(&self, event: &RecordId) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE event = $event ORDER BY created_at DESC")
            .bind(("event", event.clone()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Insert a booking, regenerating its reference code on a unique-index
    /// collision
    pub async fn create(&self, mut booking: Booking) -> RepoResult<Booking> {
        for attempt in 0..CODE_RETRIES {
            if attempt > 0 {
                booking.booking_code = codes::booking_code();
            }
            match self.base.db().create(TABLE).content(booking.clone()).await {
                Ok(Some(created)) => return Ok(created),
                Ok(None) => {
                    return Err(RepoError::Database("Failed to create booking".to_string()));
                }
                Err(e) if is_unique_index_violation(&e) => {
                    tracing::warn!(
                        code = %booking.booking_code,
                        attempt,
                        "Booking code collision, regenerating"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RepoError::Database(
            "Could not allocate a unique booking code".to_string(),
        ))
    }

    pub async fn set_session(&self, id: &RecordId, session_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET checkout_session_id = $session_id")
            .bind(("id", id.clone()))
            .bind(("session_id", session_id.to_string()))
            .await?;
        Ok(())
    }

    /// Transition payment status only when the record is still in `from`.
    ///
    /// Returns the updated booking, or `None` when the transition already
    /// happened (duplicate webhook delivery) or the record is missing.
    pub async fn mark_payment(
        &self,
        id: &RecordId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> RepoResult<Option<Booking>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET payment_status = $to \
                 WHERE payment_status = $from RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("from", from))
            .bind(("to", to))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    pub async fn set_attended(&self, id: &str, attended: bool) -> RepoResult<Booking> {
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('booking', $key) SET attended = $attended RETURN AFTER")
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("attended", attended))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        bookings
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::MealSelection;
    use chrono::Utc;

    fn seat_booking(event: RecordId, code: &str) -> Booking {
        Booking {
            id: None,
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            user_phone: None,
            event,
            seats: 1,
            byob: false,
            add_ons: vec![],
            discounts: vec![],
            subtotal_pence: 2500,
            discount_total_pence: 0,
            total_pence: 2500,
            payment_status: PaymentStatus::Pending,
            checkout_session_id: None,
            booking_code: code.to_string(),
            attended: false,
            meal_selections: vec![MealSelection {
                starter: "Soup".to_string(),
                mains: vec!["Tagine".to_string()],
                dessert: "Baklava".to_string(),
                dietary_notes: None,
            }],
            dietary_notes: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_regenerates_code_on_collision() {
        let db = DbService::memory().await.unwrap();
        let repo = BookingRepository::new(db.db.clone());
        let event: RecordId = ("event", "feb").into();

        let first = repo
            .create(seat_booking(event.clone(), "JB-COLLIDE1"))
            .await
            .unwrap();
        assert_eq!(first.booking_code, "JB-COLLIDE1");

        // Same starting code; the retry loop must hand out a fresh one
        let second = repo
            .create(seat_booking(event.clone(), "JB-COLLIDE1"))
            .await
            .unwrap();
        assert_ne!(second.booking_code, "JB-COLLIDE1");
        assert!(second.booking_code.starts_with("JB-"));
    }

    #[tokio::test]
    async fn mark_payment_is_idempotent_on_duplicate_delivery() {
        let db = DbService::memory().await.unwrap();
        let repo = BookingRepository::new(db.db.clone());
        let event: RecordId = ("event", "mar").into();

        let created = repo.create(seat_booking(event, "JB-PAYTEST1")).await.unwrap();
        let id = created.id.unwrap();

        let first = repo
            .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap();
        assert!(first.is_some());
        assert_eq!(first.unwrap().payment_status, PaymentStatus::Paid);

        // Redelivered webhook finds nothing left to transition
        let second = repo
            .mark_payment(&id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn find_by_code_is_case_insensitive() {
        let db = DbService::memory().await.unwrap();
        let repo = BookingRepository::new(db.db.clone());
        let event: RecordId = ("event", "apr").into();

        repo.create(seat_booking(event, "JB-ABCD2345")).await.unwrap();

        let found = repo.find_by_code("jb-abcd2345").await.unwrap();
        assert!(found.is_some());
    }
}
