//! Booking API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::core::ServerState;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/lookup", get(handler::lookup))
        .route("/event/{event_id}", get(handler::list_for_event))
        .route("/{id}/attended", post(handler::set_attended))
}
