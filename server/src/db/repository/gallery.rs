//! Gallery Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{GalleryItem, GalleryItemCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "gallery_item";

#[derive(Clone)]
pub struct GalleryRepository {
    base: BaseRepository,
}

impl GalleryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<GalleryItem>> {
        let items: Vec<GalleryItem> = self
            .base
            .db()
            .query("SELECT * FROM gallery_item ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn create(&self, data: GalleryItemCreate) -> RepoResult<GalleryItem> {
        if data.url.trim().is_empty() {
            return Err(RepoError::Validation("Media URL is required".into()));
        }
        let item = GalleryItem {
            id: None,
            url: data.url,
            media_type: data.media_type,
            caption: data.caption,
            event_date: data.event_date,
            created_at: Utc::now(),
        };
        let created: Option<GalleryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create gallery item".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let _: Option<GalleryItem> =
            self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::GalleryMediaType;

    #[tokio::test]
    async fn create_and_delete_round_trip() {
        let db = DbService::memory().await.unwrap();
        let repo = GalleryRepository::new(db.db.clone());

        let created = repo
            .create(GalleryItemCreate {
                url: "https://cdn.example.com/feb/table.jpg".to_string(),
                media_type: GalleryMediaType::Image,
                caption: Some("February table".to_string()),
                event_date: Some("2026-02-28".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        repo.delete(&created.id.unwrap().to_string()).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let db = DbService::memory().await.unwrap();
        let repo = GalleryRepository::new(db.db.clone());

        let result = repo
            .create(GalleryItemCreate {
                url: "   ".to_string(),
                media_type: GalleryMediaType::Image,
                caption: None,
                event_date: None,
            })
            .await;
        assert!(matches!(result, Err(RepoError::Validation(_))));
    }
}
