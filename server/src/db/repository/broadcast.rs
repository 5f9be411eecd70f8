//! Broadcast Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Broadcast, BroadcastCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "broadcast";

#[derive(Clone)]
pub struct BroadcastRepository {
    base: BaseRepository,
}

impl BroadcastRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Broadcast>> {
        let broadcasts: Vec<Broadcast> = self
            .base
            .db()
            .query("SELECT * FROM broadcast ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(broadcasts)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Broadcast>> {
        let broadcast: Option<Broadcast> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(broadcast)
    }

    pub async fn create(&self, data: BroadcastCreate) -> RepoResult<Broadcast> {
        let broadcast = Broadcast {
            id: None,
            title: data.title,
            message: data.message,
            audience: data.audience,
            channel: data.channel,
            sent_at: None,
            recipient_count: None,
            created_at: Utc::now(),
        };
        let created: Option<Broadcast> = self.base.db().create(TABLE).content(broadcast).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create broadcast".to_string()))
    }

    /// Stamp a broadcast once the delivery collaborator has fanned it out
    pub async fn mark_sent(&self, id: &str, recipient_count: u32) -> RepoResult<Broadcast> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('broadcast', $key) \
                 SET sent_at = $sent_at, recipient_count = $count RETURN AFTER",
            )
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("sent_at", Utc::now()))
            .bind(("count", recipient_count))
            .await?;
        let broadcasts: Vec<Broadcast> = result.take(0)?;
        broadcasts
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Broadcast {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{BroadcastAudience, BroadcastChannel};

    #[tokio::test]
    async fn mark_sent_stamps_time_and_count() {
        let db = DbService::memory().await.unwrap();
        let repo = BroadcastRepository::new(db.db.clone());

        let created = repo
            .create(BroadcastCreate {
                title: "February menu is live".to_string(),
                message: "Doors at six, dinner at half past".to_string(),
                audience: BroadcastAudience::All,
                channel: BroadcastChannel::Email,
            })
            .await
            .unwrap();
        assert!(created.sent_at.is_none());

        let id = created.id.unwrap().to_string();
        let sent = repo.mark_sent(&id, 42).await.unwrap();
        assert!(sent.sent_at.is_some());
        assert_eq!(sent.recipient_count, Some(42));
    }
}
