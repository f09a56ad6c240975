//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wrap the whole router in the tenant-resolution middleware
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::tenancy::middleware::resolve_tenant;
use crate::tenancy::registry::TenantRegistry;

/// Application state injected into the tenant middleware.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TenantRegistry>,
}

/// Request-id source: a fresh UUID v4 per request.
#[derive(Clone, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP server for the tenant gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and registry.
    ///
    /// The registry is passed in (rather than built here) so the caller can
    /// keep a handle for hot reload.
    pub fn new(config: GatewayConfig, registry: Arc<TenantRegistry>) -> Self {
        let state = AppState { registry };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every application route sits behind the tenant middleware, the
    /// health endpoint included. Request ID, tracing, and timeout layers
    /// wrap the pipeline from the outside.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/test", get(handlers::tenant_info))
            .route("/hc", get(handlers::health))
            .layer(middleware::from_fn_with_state(state, resolve_tenant))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The assembled router; used by integration tests to drive the full
    /// pipeline without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
