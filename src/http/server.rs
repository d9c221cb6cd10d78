//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Bind server to listener
//! - Swap in a new race coordinator when configuration changes
//! - Stop on shutdown signal

use arc_swap::ArcSwap;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::lookup::{health, lookup};
use crate::http::request::{make_request_span, UuidRequestId};
use crate::lifecycle::signals::shutdown_signal;
use crate::race::RaceCoordinator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current coordinator; replaced wholesale on config reload.
    pub coordinator: Arc<ArcSwap<RaceCoordinator>>,
}

/// HTTP server for the CEP gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    coordinator: Arc<ArcSwap<RaceCoordinator>>,
}

impl HttpServer {
    /// Create a server whose providers come from the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let coordinator = RaceCoordinator::from_config(&config)?;
        Ok(Self::with_coordinator(config, coordinator))
    }

    /// Create a server around an already built coordinator.
    pub fn with_coordinator(config: GatewayConfig, coordinator: RaceCoordinator) -> Self {
        let coordinator = Arc::new(ArcSwap::from_pointee(coordinator));
        let state = AppState {
            coordinator: coordinator.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            coordinator,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/lookup/{key}", get(lookup))
            .route("/cep/{key}", get(lookup))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    ///
    /// Configurations arriving on `config_updates` replace the race
    /// coordinator for subsequent requests; in-flight races finish on the
    /// coordinator they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            deadline_ms = self.config.race.deadline_ms,
            providers = ?self.coordinator.load().providers().iter().map(|p| p.id().to_string()).collect::<Vec<_>>(),
            "HTTP server starting"
        );

        let coordinator = self.coordinator.clone();
        let reload = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match RaceCoordinator::from_config(&new_config) {
                    Ok(next) => {
                        tracing::info!(
                            providers = next.providers().len(),
                            deadline_ms = new_config.race.deadline_ms,
                            "Race coordinator reloaded"
                        );
                        coordinator.store(Arc::new(next));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to build providers from new config, keeping current");
                    }
                }
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
