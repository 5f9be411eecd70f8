//! Drinks API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/drinks", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(handler::list_active))
        .route("/all", get(handler::list_all))
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
}
