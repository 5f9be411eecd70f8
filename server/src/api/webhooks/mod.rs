//! Webhook API module

mod handler;

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().route("/api/webhooks/checkout", post(handler::checkout))
}
