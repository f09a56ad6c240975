//! Tenant resolution middleware.
//!
//! # Data Flow
//! ```text
//! Incoming request (scheme, host, path)
//!     → resolver.rs (primary + fallback lookup)
//!     → rewrite.rs (strip virtual-path prefix)
//!     → context.rs (bind tenant into extensions)
//!     → next handler
//!
//! Unresolved → 404, downstream never runs
//! ```
//!
//! # Design Decisions
//! - Wraps the whole application router; no route bypasses resolution
//! - No retry beyond the single fallback lookup, no partial dispatch
//! - The host's cancellation signal is untouched; nothing here blocks

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::tenancy::context::TenantRequestExt;
use crate::tenancy::resolver::resolve_for_request;
use crate::tenancy::rewrite::rewrite_uri;

/// Resolve the request to a tenant, rewrite its path, and bind the tenant
/// before dispatching downstream. Answers 404 when no tenant matches.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = req.method().to_string();

    // Plaintext server sockets usually carry no scheme in the request URI;
    // default to http rather than failing every lookup.
    let scheme = req.uri().scheme_str().unwrap_or("http").to_string();
    let host = request_host(&req);
    let path = req.uri().path().to_string();

    let resolution = match resolve_for_request(&state.registry, &scheme, &host, &path) {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(
                scheme = %err.scheme,
                host = %err.host,
                segment = %err.segment,
                path = %path,
                "Tenant not resolved"
            );
            metrics::record_request(&method, StatusCode::NOT_FOUND.as_u16(), "none", start_time);
            return (StatusCode::NOT_FOUND, "No tenant matched this request").into_response();
        }
    };

    tracing::debug!(
        tenant = %resolution.tenant.name,
        tenant_id = %resolution.tenant.id,
        virtual_path = %resolution.matched_virtual_path,
        path = %path,
        "Tenant resolved"
    );

    let rewritten = rewrite_uri(req.uri(), &resolution.tenant);
    *req.uri_mut() = rewritten;
    let tenant_label = resolution.tenant.id.clone();
    req.bind_tenant(resolution.tenant);

    let response = next.run(req).await;
    metrics::record_request(&method, response.status().as_u16(), &tenant_label, start_time);
    response
}

/// Routing host for the request: URI authority when present (HTTP/2 puts
/// :authority there), otherwise the Host header.
fn request_host<B>(req: &Request<B>) -> String {
    if let Some(authority) = req.uri().authority() {
        return authority.to_string();
    }
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_host_prefers_uri_authority() {
        let req = Request::builder()
            .uri("http://localhost:5100/dev")
            .header("host", "other:9999")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), "localhost:5100");
    }

    #[test]
    fn test_request_host_falls_back_to_header() {
        let req = Request::builder()
            .uri("/dev")
            .header("host", "localhost:5100")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), "localhost:5100");
    }

    #[test]
    fn test_request_host_empty_when_missing() {
        let req = Request::builder().uri("/dev").body(()).unwrap();
        assert_eq!(request_host(&req), "");
    }
}
