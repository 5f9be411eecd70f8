//! Broadcast API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/broadcasts", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}/sent", post(handler::mark_sent))
}
