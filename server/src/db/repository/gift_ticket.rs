//! Gift Ticket Repository

use super::{BaseRepository, RepoError, RepoResult, is_unique_index_violation, record_key};
use crate::db::models::{GiftTicket, PaymentStatus};
use crate::domain::codes;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "gift_ticket";

const CODE_RETRIES: usize = 4;

#[derive(Clone)]
pub struct GiftTicketRepository {
    base: BaseRepository,
}

impl GiftTicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<GiftTicket>> {
        let ticket: Option<GiftTicket> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(ticket)
    }

    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<GiftTicket>> {
        let code_owned = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM gift_ticket WHERE code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let tickets: Vec<GiftTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Option<GiftTicket>> {
        let session_owned = session_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM gift_ticket WHERE checkout_session_id = $session_id LIMIT 1")
            .bind(("session_id", session_owned))
            .await?;
        let tickets: Vec<GiftTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    /// Insert a gift ticket, regenerating its code on a unique-index
    /// collision
    pub async fn create(&self, mut ticket: GiftTicket) -> RepoResult<GiftTicket> {
        for attempt in 0..CODE_RETRIES {
            if attempt > 0 {
                ticket.code = codes::gift_code();
            }
            match self.base.db().create(TABLE).content(ticket.clone()).await {
                Ok(Some(created)) => return Ok(created),
                Ok(None) => {
                    return Err(RepoError::Database(
                        "Failed to create gift ticket".to_string(),
                    ));
                }
                Err(e) if is_unique_index_violation(&e) => {
                    tracing::warn!(
                        code = %ticket.code,
                        attempt,
                        "Gift code collision, regenerating"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RepoError::Database(
            "Could not allocate a unique gift code".to_string(),
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

    /// Conditional payment-status transition; see BookingRepository
    pub async fn mark_payment(
        &self,
        id: &RecordId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> RepoResult<Option<GiftTicket>> {
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
        let tickets: Vec<GiftTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    /// Redeem a paid, unredeemed ticket in one conditional update.
    ///
    /// `Ok(None)` means the ticket was already redeemed, expired, or never
    /// paid for; the caller decides which of those to report after a
    /// follow-up read.
    pub async fn redeem(&self, id: &RecordId, redeemed_by: &str) -> RepoResult<Option<GiftTicket>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPDATE $id SET status = 'REDEEMED', redeemed_by = $redeemed_by
                    WHERE status IN ['PURCHASED', 'SENT']
                      AND payment_status = 'PAID'
                    RETURN AFTER;
                "#,
            )
            .bind(("id", id.clone()))
            .bind(("redeemed_by", redeemed_by.to_string()))
            .await?;
        let tickets: Vec<GiftTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }
}
