//! Supper Club Server - bookings for a monthly dinner series
//!
//! # Overview
//!
//! One dinner per calendar month, always the last Saturday at 18:30
//! venue time. This crate covers the whole booking flow:
//!
//! - **Events** (`events`): monthly draft materialization and scheduling
//! - **Domain rules** (`domain`): calendar, pricing, reference codes
//! - **Discounts** (`discounts`): code validation with race-safe caps
//! - **Payments** (`payments`): hosted checkout sessions and webhooks
//! - **Database** (`db`): embedded SurrealDB storage
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, server
//! ├── domain/        # calendar, pricing, codes
//! ├── discounts/     # discount validation
//! ├── events/        # materializer, scheduler
//! ├── payments/      # checkout client, webhook processing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod discounts;
pub mod domain;
pub mod events;
pub mod payments;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, work directory, logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/supperclub".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    if std::env::var("LOG_TO_FILE").map(|v| v == "true").unwrap_or(false) {
        let log_dir = format!("{}/logs", work_dir);
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(Some(&log_level), Some(&log_dir));
    } else {
        init_logger_with_file(Some(&log_level), None);
    }
    Ok(())
}
