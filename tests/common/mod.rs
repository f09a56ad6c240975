//! Shared utilities for integration testing.

use std::sync::Arc;

use axum::{http::Uri, middleware, routing::any, Extension, Json, Router};
use serde_json::{json, Value};

use tenant_gateway::config::GatewayConfig;
use tenant_gateway::http::{AppState, HttpServer};
use tenant_gateway::tenancy::{middleware::resolve_tenant, ResolvedTenant, Tenant, TenantRegistry};

#[allow(dead_code)]
pub fn tenant(id: &str, host: &str, virtual_path: &str, name: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        scheme: "http".to_string(),
        host: host.to_string(),
        virtual_path: virtual_path.to_string(),
        name: name.to_string(),
    }
}

/// The two path-scoped tenants the service was originally deployed with.
#[allow(dead_code)]
pub fn dev_stg_tenants() -> Vec<Tenant> {
    vec![
        tenant("1", "localhost:5100", "dev", "Dev"),
        tenant("2", "localhost:5100", "stg", "Stg"),
    ]
}

/// The full application router (the /test and /hc routes behind the
/// pipeline), as served in production.
#[allow(dead_code)]
pub fn app_router(tenants: Vec<Tenant>) -> Router {
    let registry = Arc::new(TenantRegistry::from_tenants(tenants));
    HttpServer::new(GatewayConfig::default(), registry).router()
}

/// A router whose only handler echoes what it observed: the (rewritten)
/// path, the query string, and the bound tenant. Lets tests assert exactly
/// what downstream handlers see.
#[allow(dead_code)]
pub fn echo_router(tenants: Vec<Tenant>) -> Router {
    let state = AppState {
        registry: Arc::new(TenantRegistry::from_tenants(tenants)),
    };

    async fn echo(tenant: Option<Extension<ResolvedTenant>>, uri: Uri) -> Json<Value> {
        Json(json!({
            "path": uri.path(),
            "query": uri.query(),
            "tenant": tenant.as_ref().map(|t| t.name.clone()),
        }))
    }

    Router::new()
        .route("/", any(echo))
        .route("/{*rest}", any(echo))
        .layer(middleware::from_fn_with_state(state, resolve_tenant))
}
