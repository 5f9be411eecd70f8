//! Discount API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/validate", post(handler::validate))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
}
