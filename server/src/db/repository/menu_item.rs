//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Course, MenuItem, MenuItemCreate, MenuItemUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY sort_order ASC, name ASC")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Customer-facing menu, course order preserved by the caller
    pub async fn find_active(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE active = true ORDER BY sort_order ASC, name ASC")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_active_by_course(&self, course: Course) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item WHERE active = true AND course = $course \
                 ORDER BY sort_order ASC, name ASC",
            )
            .bind(("course", course))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(item)
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            course: data.course,
            active: data.active.unwrap_or(true),
            sort_order: data.sort_order.unwrap_or(0),
            created_at: Utc::now(),
        };
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let updated: Option<MenuItem> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let _: Option<MenuItem> =
            self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn dish(name: &str, course: Course, sort_order: i32) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            course,
            active: Some(true),
            sort_order: Some(sort_order),
        }
    }

    #[tokio::test]
    async fn active_menu_respects_sort_order_within_course() {
        let db = DbService::memory().await.unwrap();
        let repo = MenuItemRepository::new(db.db.clone());

        repo.create(dish("Harissa Chicken", Course::Main, 2)).await.unwrap();
        repo.create(dish("Lamb Tagine", Course::Main, 1)).await.unwrap();
        repo.create(dish("Soup", Course::Starter, 1)).await.unwrap();

        let mut off_menu = dish("Retired Special", Course::Main, 0);
        off_menu.active = Some(false);
        repo.create(off_menu).await.unwrap();

        let mains = repo.find_active_by_course(Course::Main).await.unwrap();
        let names: Vec<_> = mains.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Lamb Tagine", "Harissa Chicken"]);
    }
}
