//! Database Module
//!
//! Embedded SurrealDB storage. The schema is mostly schemaless; the
//! unique indexes defined here are load-bearing - they close the
//! check-then-insert races on period keys and codes.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "supperclub";
const DATABASE: &str = "main";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the RocksDB-backed database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established ({db_path})");
        Ok(Self { db })
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        Ok(Self { db })
    }
}

/// Define the unique indexes the domain relies on:
/// - at most one event per period key
/// - discount codes, booking codes and gift codes are unique
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS uniq_event_month_key ON TABLE event FIELDS month_key UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_discount_code ON TABLE discount FIELDS code UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_booking_code ON TABLE booking FIELDS booking_code UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_gift_code ON TABLE gift_ticket FIELDS code UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    tracing::debug!("Database schema applied");
    Ok(())
}
