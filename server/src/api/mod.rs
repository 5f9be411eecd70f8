//! API Routes
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`events`] - monthly event listing and admin lifecycle edits
//! - [`menu`] - dinner menu management
//! - [`drinks`] - drink add-on management
//! - [`discounts`] - discount codes and validation
//! - [`checkout`] - seat and gift-ticket checkout
//! - [`bookings`] - booking lookup and attendance
//! - [`gifts`] - gift ticket lookup and redemption
//! - [`webhooks`] - payment provider callbacks
//! - [`broadcasts`] - admin announcements
//! - [`gallery`] - past-event media

use axum::Router;
use http::{HeaderName, HeaderValue};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod bookings;
pub mod broadcasts;
pub mod checkout;
pub mod discounts;
pub mod drinks;
pub mod events;
pub mod gallery;
pub mod gifts;
pub mod health;
pub mod menu;
pub mod router_ext;
pub mod webhooks;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware)
pub fn build_router() -> Router<Arc<ServerState>> {
    Router::new()
        .merge(health::router())
        .merge(events::router())
        .merge(menu::router())
        .merge(drinks::router())
        .merge(discounts::router())
        .merge(checkout::router())
        .merge(bookings::router())
        .merge(gifts::router())
        .merge(webhooks::router())
        .merge(broadcasts::router())
        .merge(gallery::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: Arc<ServerState>) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
