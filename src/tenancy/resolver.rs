//! Request-to-tenant resolution.
//!
//! # Responsibilities
//! - Extract the first path segment (the candidate virtual path)
//! - Primary lookup: (scheme, host, segment)
//! - Fallback lookup: (scheme, host, "") for the host's default tenant
//!
//! # Design Decisions
//! - Two-tier lookup so one domain can host path-scoped tenants
//!   (/dev/..., /stg/...) and still serve unprefixed requests
//!   (e.g. /favicon.ico) from a default tenant
//! - Matching is greedy: a first segment equal to a known virtual path
//!   always selects that tenant, even if the default tenant has a resource
//!   of the same name. Known limitation, kept deliberately.

use thiserror::Error;

use crate::tenancy::registry::TenantRegistry;
use crate::tenancy::tenant::Tenant;

/// Neither the path-scoped lookup nor the host fallback matched.
///
/// Expected outcome for unknown hosts or hosts without a default tenant;
/// the pipeline turns it into a 404.
#[derive(Debug, Error)]
#[error("no tenant for {scheme}://{host} (first segment: {segment:?})")]
pub struct Unresolved {
    pub scheme: String,
    pub host: String,
    pub segment: String,
}

/// A successful resolution: the tenant plus the virtual path that matched
/// ("" when the fallback tenant was selected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tenant: Tenant,
    pub matched_virtual_path: String,
}

/// First path segment: the substring between the first and second "/",
/// empty when the path has fewer than two segments.
pub fn first_segment(path: &str) -> &str {
    let mut segments = path.split('/');
    segments.next();
    segments.next().unwrap_or("")
}

/// Resolve a request's (scheme, host, path) to a tenant.
///
/// Tries the first path segment as a virtual path, then falls back to the
/// host's default tenant (empty virtual path) when the segment lookup
/// misses.
pub fn resolve_for_request(
    registry: &TenantRegistry,
    scheme: &str,
    host: &str,
    path: &str,
) -> Result<Resolution, Unresolved> {
    let segment = first_segment(path);

    if let Some(tenant) = registry.resolve(scheme, host, segment) {
        return Ok(Resolution {
            tenant,
            matched_virtual_path: segment.to_string(),
        });
    }

    // Host-level default tenant; only worth a second scan when the first
    // lookup used a non-empty segment.
    if !segment.is_empty() {
        if let Some(tenant) = registry.resolve(scheme, host, "") {
            return Ok(Resolution {
                tenant,
                matched_virtual_path: String::new(),
            });
        }
    }

    Err(Unresolved {
        scheme: scheme.to_string(),
        host: host.to_string(),
        segment: segment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str, virtual_path: &str, name: &str) -> Tenant {
        Tenant {
            id: id.to_string(),
            scheme: "http".to_string(),
            host: "localhost:5100".to_string(),
            virtual_path: virtual_path.to_string(),
            name: name.to_string(),
        }
    }

    fn registry_with_fallback() -> TenantRegistry {
        TenantRegistry::from_tenants(vec![
            tenant("1", "dev", "Dev"),
            tenant("2", "stg", "Stg"),
            tenant("3", "", "Default"),
        ])
    }

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/dev/api/items"), "dev");
        assert_eq!(first_segment("/dev"), "dev");
        assert_eq!(first_segment("/"), "");
        assert_eq!(first_segment(""), "");
    }

    #[test]
    fn test_resolves_path_scoped_tenant() {
        let registry = registry_with_fallback();
        let res = resolve_for_request(&registry, "http", "localhost:5100", "/dev/widgets")
            .unwrap();
        assert_eq!(res.tenant.name, "Dev");
        assert_eq!(res.matched_virtual_path, "dev");
    }

    #[test]
    fn test_unknown_segment_falls_back_to_default() {
        let registry = registry_with_fallback();
        let res =
            resolve_for_request(&registry, "http", "localhost:5100", "/unknown").unwrap();
        assert_eq!(res.tenant.name, "Default");
        assert_eq!(res.matched_virtual_path, "");
    }

    #[test]
    fn test_root_path_uses_fallback_only() {
        let registry = registry_with_fallback();
        let res = resolve_for_request(&registry, "http", "localhost:5100", "/").unwrap();
        assert_eq!(res.tenant.name, "Default");
    }

    #[test]
    fn test_no_fallback_yields_unresolved() {
        let registry = TenantRegistry::from_tenants(vec![
            tenant("1", "dev", "Dev"),
            tenant("2", "stg", "Stg"),
        ]);
        let err = resolve_for_request(&registry, "http", "localhost:5100", "/unknown")
            .unwrap_err();
        assert_eq!(err.segment, "unknown");
    }

    #[test]
    fn test_unknown_host_yields_unresolved() {
        let registry = registry_with_fallback();
        assert!(resolve_for_request(&registry, "http", "other:9999", "/dev").is_err());
    }

    #[test]
    fn test_scheme_mismatch_yields_unresolved() {
        let registry = registry_with_fallback();
        assert!(resolve_for_request(&registry, "https", "localhost:5100", "/dev").is_err());
    }
}
