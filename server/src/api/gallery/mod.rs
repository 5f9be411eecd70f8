//! Gallery API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/gallery", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
}
