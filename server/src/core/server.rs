//! Server Implementation
//!
//! HTTP server startup, background scheduler, graceful shutdown.

use crate::api;
use crate::core::{Config, ServerState};
use crate::events::EventScheduler;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = ServerState::initialize(self.config.clone()).await?;

        // Background event scheduler; its startup tick materializes the
        // current month if the server was down over a month boundary
        let scheduler = EventScheduler::new(state.materializer(), state.config.timezone);
        let cancel_token = scheduler.cancel_token();
        let scheduler_handle = scheduler.start();

        let app = api::build_app(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Supper club server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        cancel_token.cancel();
        let _ = scheduler_handle.await;
        Ok(())
    }
}
