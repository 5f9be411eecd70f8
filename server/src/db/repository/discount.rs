//! Discount Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Discount, DiscountCreate, DiscountRules, DiscountUpdate};
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "discount";

#[derive(Clone)]
pub struct DiscountRepository {
    base: BaseRepository,
}

impl DiscountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Discount>> {
        let discounts: Vec<Discount> = self
            .base
            .db()
            .query("SELECT * FROM discount ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(discounts)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Discount>> {
        let discount: Option<Discount> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(discount)
    }

    /// Lookup among active records; `code` must already be uppercased
    pub async fn find_active_by_code(&self, code: &str) -> RepoResult<Option<Discount>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM discount WHERE code = $code AND active = true LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let discounts: Vec<Discount> = result.take(0)?;
        Ok(discounts.into_iter().next())
    }

    /// Consume one use of the discount.
    ///
    /// The usage-cap check and the increment are a single conditional
    /// update, so two concurrent redemptions of a cap-1 code can never
    /// both succeed; the loser gets `Ok(None)`.
    pub async fn redeem(&self, id: &RecordId) -> RepoResult<Option<Discount>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPDATE $id SET rules.current_uses += 1
                    WHERE active = true
                      AND (rules.max_uses = NONE OR rules.current_uses < rules.max_uses)
                    RETURN AFTER;
                "#,
            )
            .bind(("id", id.clone()))
            .await?;
        let updated: Vec<Discount> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    pub async fn create(&self, data: DiscountCreate) -> RepoResult<Discount> {
        let code = data.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(RepoError::Validation("Discount code is required".into()));
        }
        if self.find_active_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Discount '{}' already exists",
                code
            )));
        }

        let discount = Discount {
            id: None,
            code,
            kind: data.kind,
            scope: data.scope,
            value: data.value,
            rules: DiscountRules {
                min_seats: data.min_seats,
                max_uses: data.max_uses,
                current_uses: 0,
            },
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            active: data.active.unwrap_or(true),
            created_at: Utc::now(),
        };

        let created: Option<Discount> = self.base.db().create(TABLE).content(discount).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create discount".to_string()))
    }

    pub async fn update(&self, id: &str, data: DiscountUpdate) -> RepoResult<Discount> {
        let key = record_key(TABLE, id);
        let updated: Option<Discount> = self.base.db().update((TABLE, key)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Discount {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let _: Option<Discount> = self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::DiscountKind;
    use chrono::{Duration, Utc};

    fn capped_discount(code: &str, max_uses: u32) -> DiscountCreate {
        DiscountCreate {
            code: code.to_string(),
            kind: DiscountKind::Percentage,
            scope: Default::default(),
            value: 10,
            min_seats: None,
            max_uses: Some(max_uses),
            valid_from: Utc::now() - Duration::days(1),
            valid_until: Utc::now() + Duration::days(1),
            active: Some(true),
        }
    }

    #[tokio::test]
    async fn redeem_stops_at_the_usage_cap() {
        let db = DbService::memory().await.unwrap();
        let repo = DiscountRepository::new(db.db.clone());

        let created = repo.create(capped_discount("CAP2", 2)).await.unwrap();
        let id = created.id.unwrap();

        assert!(repo.redeem(&id).await.unwrap().is_some());
        assert!(repo.redeem(&id).await.unwrap().is_some());
        // Third redemption must fail: current_uses reached max_uses
        assert!(repo.redeem(&id).await.unwrap().is_none());

        let after = repo.find_by_id(&id.to_string()).await.unwrap().unwrap();
        assert_eq!(after.rules.current_uses, 2);
    }

    #[tokio::test]
    async fn concurrent_redemptions_never_overshoot_a_cap_of_one() {
        let db = DbService::memory().await.unwrap();
        let repo = DiscountRepository::new(db.db.clone());

        let created = repo.create(capped_discount("ONCE", 1)).await.unwrap();
        let id = created.id.unwrap();

        let a = repo.clone();
        let b = repo.clone();
        let id_a = id.clone();
        let id_b = id.clone();
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { a.redeem(&id_a).await }),
            tokio::spawn(async move { b.redeem(&id_b).await }),
        );

        let wins = [ra.unwrap().unwrap(), rb.unwrap().unwrap()]
            .into_iter()
            .filter(Option::is_some)
            .count();
        assert_eq!(wins, 1);

        let after = repo.find_by_id(&id.to_string()).await.unwrap().unwrap();
        assert_eq!(after.rules.current_uses, 1);
    }

    #[tokio::test]
    async fn uncapped_discount_increments_freely() {
        let db = DbService::memory().await.unwrap();
        let repo = DiscountRepository::new(db.db.clone());

        let mut payload = capped_discount("OPEN", 1);
        payload.max_uses = None;
        let created = repo.create(payload).await.unwrap();
        let id = created.id.unwrap();

        for _ in 0..3 {
            assert!(repo.redeem(&id).await.unwrap().is_some());
        }
        let after = repo.find_by_id(&id.to_string()).await.unwrap().unwrap();
        assert_eq!(after.rules.current_uses, 3);
    }
}
