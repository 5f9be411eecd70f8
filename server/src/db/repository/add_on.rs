//! Add-on Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{AddOn, AddOnCreate, AddOnUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "add_on";

#[derive(Clone)]
pub struct AddOnRepository {
    base: BaseRepository,
}

impl AddOnRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<AddOn>> {
        let add_ons: Vec<AddOn> = self
            .base
            .db()
            .query("SELECT * FROM add_on ORDER BY name ASC")
            .await?
            .take(0)?;
        Ok(add_ons)
    }

    /// Customer-facing drinks list
    pub async fn find_active(&self) -> RepoResult<Vec<AddOn>> {
        let add_ons: Vec<AddOn> = self
            .base
            .db()
            .query("SELECT * FROM add_on WHERE active = true ORDER BY name ASC")
            .await?
            .take(0)?;
        Ok(add_ons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<AddOn>> {
        let add_on: Option<AddOn> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(add_on)
    }

    pub async fn create(&self, data: AddOnCreate) -> RepoResult<AddOn> {
        if data.price_pence < 0 {
            return Err(RepoError::Validation(
                "Add-on price cannot be negative".into(),
            ));
        }
        let add_on = AddOn {
            id: None,
            name: data.name,
            description: data.description,
            price_pence: data.price_pence,
            category: data.category,
            active: data.active.unwrap_or(true),
            created_at: Utc::now(),
        };
        let created: Option<AddOn> = self.base.db().create(TABLE).content(add_on).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create add-on".to_string()))
    }

    pub async fn update(&self, id: &str, data: AddOnUpdate) -> RepoResult<AddOn> {
        if matches!(data.price_pence, Some(p) if p < 0) {
            return Err(RepoError::Validation(
                "Add-on price cannot be negative".into(),
            ));
        }
        let updated: Option<AddOn> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Add-on {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let _: Option<AddOn> = self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(true)
    }
}
