//! Event API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(handler::list_upcoming))
        .route("/", post(handler::materialize))
        .route("/next", get(handler::next_event))
        .route("/all", get(handler::list_all))
        .route("/materialize", post(handler::materialize))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update))
}
