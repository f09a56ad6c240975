//! Application handlers behind the tenant pipeline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::tenancy::context::ResolvedTenant;

#[derive(Serialize)]
pub struct TenantInfo {
    pub id: String,
    pub name: String,
    pub virtual_path: String,
}

#[derive(Serialize)]
pub struct Health {
    pub ok: bool,
}

/// Echo the tenant bound by the resolution middleware.
///
/// The extension is absent only when this handler is mounted outside the
/// pipeline; answer 404 rather than assuming a tenant is in scope.
pub async fn tenant_info(tenant: Option<Extension<ResolvedTenant>>) -> Response {
    match tenant {
        Some(Extension(tenant)) => Json(TenantInfo {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            virtual_path: tenant.virtual_path.clone(),
        })
        .into_response(),
        None => (StatusCode::NOT_FOUND, "no tenant in scope").into_response(),
    }
}

/// Liveness probe.
pub async fn health() -> Json<Health> {
    Json(Health { ok: true })
}
