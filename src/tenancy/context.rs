//! Request-scoped tenant context.
//!
//! The resolved tenant rides in the request's extensions under its own type,
//! so the key cannot collide with anything else and the value is dropped
//! with the request.

use std::sync::Arc;

use axum::http::Request;

use crate::tenancy::tenant::Tenant;

/// The tenant bound to the current request.
///
/// Handlers can extract this with `Extension<ResolvedTenant>` (or the
/// `Option<...>` form when absence is acceptable).
#[derive(Debug, Clone)]
pub struct ResolvedTenant(pub Arc<Tenant>);

impl ResolvedTenant {
    pub fn new(tenant: Tenant) -> Self {
        Self(Arc::new(tenant))
    }
}

impl std::ops::Deref for ResolvedTenant {
    type Target = Tenant;

    fn deref(&self) -> &Tenant {
        &self.0
    }
}

/// Bind/lookup helpers on `http::Request`.
pub trait TenantRequestExt {
    /// Attach `tenant` to this request's extensions.
    fn bind_tenant(&mut self, tenant: Tenant);

    /// The tenant bound earlier in this request's pipeline, if any.
    /// `None` means "no tenant in scope" and must be handled, not unwrapped.
    fn tenant(&self) -> Option<&Tenant>;
}

impl<B> TenantRequestExt for Request<B> {
    fn bind_tenant(&mut self, tenant: Tenant) {
        self.extensions_mut().insert(ResolvedTenant::new(tenant));
    }

    fn tenant(&self) -> Option<&Tenant> {
        self.extensions().get::<ResolvedTenant>().map(|t| &*t.0)
    }
}
