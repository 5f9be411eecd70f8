//! Router extension for oneshot calls
//!
//! Provides the ability to call the router directly without going
//! through the network stack. Handler tests use this to exercise the
//! full route table, extractors included.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use std::sync::Arc;
use tower::Service;

use crate::core::ServerState;

/// Result type for oneshot API calls
pub type OneshotResult = Result<Response<Body>>;

/// Extension trait for Router to support oneshot calls
#[allow(async_fn_in_trait)]
pub trait OneshotRouter {
    /// Process a single request against the route table with the given
    /// state applied
    async fn oneshot(&mut self, state: Arc<ServerState>, request: Request<Body>) -> OneshotResult;
}

impl OneshotRouter for Router<Arc<ServerState>> {
    async fn oneshot(&mut self, state: Arc<ServerState>, request: Request<Body>) -> OneshotResult {
        // Clone router and apply state, then call as Service
        let mut svc = self.clone().with_state(state);
        let response = svc.call(request).await?;
        Ok(response)
    }
}
