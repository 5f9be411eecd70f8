//! Health API module

mod handler;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/health", get(handler::health))
        .route("/api/health", get(handler::health))
}
