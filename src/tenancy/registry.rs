//! Tenant registry: exact-match lookup over the configured tenant set.
//!
//! # Responsibilities
//! - Store the loaded tenants
//! - Answer exact (scheme, host, virtual_path) lookups
//! - Support atomic replacement on config reload
//!
//! # Design Decisions
//! - Explicit instance passed via state, never a global
//! - RwLock: many concurrent readers, a writer only on hot reload
//! - Full scan per lookup; the set is small and read-mostly
//! - Explicit no-match (None) rather than a silent default

use std::sync::RwLock;

use crate::tenancy::tenant::Tenant;

/// Read-mostly store of all known tenants.
///
/// The configured uniqueness invariant (at most one tenant per
/// (scheme, host, virtual_path) triple) is enforced by config validation
/// before tenants reach the registry, so the first structural match is the
/// only one.
#[derive(Debug, Default)]
pub struct TenantRegistry {
    tenants: RwLock<Vec<Tenant>>,
}

impl TenantRegistry {
    /// Create a registry holding the given tenants.
    pub fn from_tenants(tenants: Vec<Tenant>) -> Self {
        Self {
            tenants: RwLock::new(tenants),
        }
    }

    /// Look up the tenant matching the triple exactly.
    ///
    /// Returns `None` when no tenant matches. This is an expected, frequent
    /// outcome (it drives the caller's fallback lookup), not an error.
    pub fn resolve(&self, scheme: &str, host: &str, virtual_path: &str) -> Option<Tenant> {
        let tenants = self.tenants.read().expect("tenant registry lock poisoned");
        tenants
            .iter()
            .find(|t| t.matches(scheme, host, virtual_path))
            .cloned()
    }

    /// Replace the entire tenant set. Used by config hot reload; the
    /// request pipeline never calls this.
    pub fn replace_all(&self, tenants: Vec<Tenant>) {
        let mut guard = self.tenants.write().expect("tenant registry lock poisoned");
        *guard = tenants;
    }

    /// Number of registered tenants.
    pub fn len(&self) -> usize {
        self.tenants.read().expect("tenant registry lock poisoned").len()
    }

    /// True if no tenants are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
