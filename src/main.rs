//! Multi-tenant HTTP gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────┐
//!                     │               TENANT GATEWAY               │
//!                     │                                            │
//!  Client Request     │  ┌─────────┐   ┌──────────┐   ┌─────────┐  │
//!  ───────────────────┼─▶│  http   │──▶│ tenancy  │──▶│ handler │  │
//!                     │  │ server  │   │ pipeline │   │ routes  │  │
//!                     │  └─────────┘   └────┬─────┘   └─────────┘  │
//!                     │                     │                      │
//!                     │                     ▼                      │
//!                     │             ┌──────────────┐               │
//!                     │             │   tenant     │◀── config     │
//!                     │             │   registry   │    (+ reload) │
//!                     │             └──────────────┘               │
//!                     │                                            │
//!                     │  ┌──────────────────────────────────────┐  │
//!                     │  │         Cross-Cutting Concerns       │  │
//!                     │  │  config · lifecycle · observability  │  │
//!                     │  └──────────────────────────────────────┘  │
//!                     └────────────────────────────────────────────┘
//! ```
//!
//! The tenancy pipeline resolves (scheme, host, first path segment) to a
//! tenant, rewrites the path to drop the tenant prefix, and binds the
//! tenant into the request's extensions. Requests no tenant claims are
//! answered with 404 before any application handler runs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenant_gateway::config::{load_config, ConfigWatcher, GatewayConfig};
use tenant_gateway::lifecycle::{wait_for_signal, Shutdown};
use tenant_gateway::tenancy::TenantRegistry;
use tenant_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "tenant-gateway")]
#[command(about = "Multi-tenant HTTP gateway", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to wait for in-flight requests on shutdown (overrides config).
    #[arg(long)]
    graceful_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenant_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("tenant-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            tracing::warn!("No config file given, using defaults");
            GatewayConfig::default()
        }
    };
    if let Some(secs) = cli.graceful_timeout {
        config.timeouts.graceful_shutdown_secs = secs;
    }

    if config.tenants.is_empty() {
        tracing::warn!("No tenants configured; every request will be answered 404");
    }

    let registry = Arc::new(TenantRegistry::from_tenants(config.tenants.clone()));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tenants = registry.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            tenant_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();

    // Hot reload: watch the config file and swap the tenant set on change.
    // The watcher handle must stay alive for the process lifetime.
    let _watcher = match &cli.config {
        Some(path) => {
            let watcher = ConfigWatcher::new(path, registry.clone());
            Some(watcher.run(shutdown.subscribe())?)
        }
        None => None,
    };

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let drain = Duration::from_secs(config.timeouts.graceful_shutdown_secs);
    let server = HttpServer::new(config, registry);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        // Server exited on its own (accept error); surface it.
        joined = &mut server_task => joined??,
        _ = wait_for_signal() => {
            shutdown.trigger();

            // Bounded drain: wait for in-flight requests, then give up.
            match tokio::time::timeout(drain, &mut server_task).await {
                Ok(joined) => joined??,
                Err(_) => {
                    tracing::warn!(
                        drain_secs = drain.as_secs(),
                        "Drain deadline reached, exiting with connections still open"
                    );
                }
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
