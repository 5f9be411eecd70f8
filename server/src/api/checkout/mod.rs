//! Checkout API module

mod handler;

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/booking", post(handler::booking))
        .route("/gift", post(handler::gift))
}
