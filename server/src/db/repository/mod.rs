//! Repository Module
//!
//! CRUD and conditional-update operations over SurrealDB tables. All
//! check-then-act sequences that matter for correctness (usage caps,
//! period-key idempotency, payment transitions) are expressed as single
//! conditional statements here, never as read-then-write in the callers.

pub mod add_on;
pub mod booking;
pub mod broadcast;
pub mod discount;
pub mod event;
pub mod gallery;
pub mod gift_ticket;
pub mod menu_item;

// Re-exports
pub use add_on::AddOnRepository;
pub use booking::BookingRepository;
pub use broadcast::BroadcastRepository;
pub use discount::DiscountRepository;
pub use event::EventRepository;
pub use gallery::GalleryRepository;
pub use gift_ticket::GiftTicketRepository;
pub use menu_item::MenuItemRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Strip an optional `"table:"` prefix from an API-supplied id
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Whether a SurrealDB error is a unique-index violation
pub(crate) fn is_unique_index_violation(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already contains")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_strips_table_prefix() {
        assert_eq!(record_key("event", "event:abc"), "abc");
        assert_eq!(record_key("event", "abc"), "abc");
        // Foreign table prefixes are left alone
        assert_eq!(record_key("event", "booking:abc"), "booking:abc");
    }
}
