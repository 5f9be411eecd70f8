//! Gift Ticket API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/gifts", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/lookup", get(handler::lookup))
        .route("/{code}/redeem", post(handler::redeem))
}
