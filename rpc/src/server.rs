//! Axum-based HTTP server for the verification API.

use crate::error::RpcError;
use crate::handlers;
use crate::metrics::VerificationMetrics;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use veriport_service::VerificationService;

/// Shared state behind every handler.
pub struct RpcState {
    pub service: Arc<VerificationService>,
    pub metrics: Arc<VerificationMetrics>,
    pub started_at: Instant,
}

impl RpcState {
    pub fn new(service: Arc<VerificationService>, metrics: Arc<VerificationMetrics>) -> Self {
        Self {
            service,
            metrics,
            started_at: Instant::now(),
        }
    }
}

/// The HTTP server, configured with a listen address and shared state.
pub struct RpcServer {
    pub listen: String,
    pub state: Arc<RpcState>,
}

impl RpcServer {
    pub fn new(listen: impl Into<String>, state: Arc<RpcState>) -> Self {
        Self {
            listen: listen.into(),
            state,
        }
    }

    /// The full API surface. Embedders and tests can serve this router
    /// directly.
    pub fn router(state: Arc<RpcState>) -> Router {
        Router::new()
            .route("/v1/verify", post(handlers::verify_traveler))
            .route("/v1/trust/:identity_hash", get(handlers::trust_status))
            .route("/v1/invalidate", post(handlers::invalidate_trust))
            .route("/v1/telemetry", get(handlers::telemetry))
            .route("/health", get(handlers::health))
            .route("/metrics", get(handlers::metrics))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Serve until the shutdown future resolves.
    pub async fn start(
        &self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        let app = Self::router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(&self.listen)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.listen)))?;
        tracing::info!(listen = %self.listen, "rpc server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        Ok(())
    }
}
