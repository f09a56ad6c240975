//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce tenant registry invariants before tenants are accepted:
//!   unique (scheme, host, virtual_path) triples, no "/" inside a virtual
//!   path, at most one fallback per (scheme, host)
//! - Validate value ranges (addresses parse, ids non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the registry and
//!   resolver assume the invariants afterwards

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tenant at index {index} has an empty id")]
    EmptyTenantId { index: usize },

    #[error("duplicate tenant id {id:?}")]
    DuplicateTenantId { id: String },

    #[error("tenant {id:?}: virtual path {virtual_path:?} must not contain '/'")]
    VirtualPathContainsSlash { id: String, virtual_path: String },

    #[error("tenants {first:?} and {second:?} share ({scheme}, {host}, {virtual_path:?})")]
    DuplicateTriple {
        first: String,
        second: String,
        scheme: String,
        host: String,
        virtual_path: String,
    },

    #[error("tenants {first:?} and {second:?} are both fallbacks for ({scheme}, {host})")]
    DuplicateFallback {
        first: String,
        second: String,
        scheme: String,
        host: String,
    },

    #[error("invalid bind address {address:?}")]
    InvalidBindAddress { address: String },
}

/// Check the configuration's semantic invariants, collecting every
/// violation rather than stopping at the first.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    let mut seen_ids = HashSet::new();
    let mut seen_triples: Vec<(&str, &str, &str, &str)> = Vec::new();

    for (index, tenant) in config.tenants.iter().enumerate() {
        if tenant.id.is_empty() {
            errors.push(ValidationError::EmptyTenantId { index });
        } else if !seen_ids.insert(tenant.id.as_str()) {
            errors.push(ValidationError::DuplicateTenantId {
                id: tenant.id.clone(),
            });
        }

        if tenant.virtual_path.contains('/') {
            errors.push(ValidationError::VirtualPathContainsSlash {
                id: tenant.id.clone(),
                virtual_path: tenant.virtual_path.clone(),
            });
        }

        if let Some((first_id, ..)) = seen_triples
            .iter()
            .find(|(_, s, h, v)| {
                *s == tenant.scheme && *h == tenant.host && *v == tenant.virtual_path
            })
            .copied()
        {
            if tenant.is_fallback() {
                errors.push(ValidationError::DuplicateFallback {
                    first: first_id.to_string(),
                    second: tenant.id.clone(),
                    scheme: tenant.scheme.clone(),
                    host: tenant.host.clone(),
                });
            } else {
                errors.push(ValidationError::DuplicateTriple {
                    first: first_id.to_string(),
                    second: tenant.id.clone(),
                    scheme: tenant.scheme.clone(),
                    host: tenant.host.clone(),
                    virtual_path: tenant.virtual_path.clone(),
                });
            }
        } else {
            seen_triples.push((
                tenant.id.as_str(),
                tenant.scheme.as_str(),
                tenant.host.as_str(),
                tenant.virtual_path.as_str(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenancy::tenant::Tenant;

    fn tenant(id: &str, host: &str, virtual_path: &str) -> Tenant {
        Tenant {
            id: id.to_string(),
            scheme: "http".to_string(),
            host: host.to_string(),
            virtual_path: virtual_path.to_string(),
            name: id.to_string(),
        }
    }

    fn config_with(tenants: Vec<Tenant>) -> GatewayConfig {
        GatewayConfig {
            tenants,
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = config_with(vec![
            tenant("1", "localhost:5100", "dev"),
            tenant("2", "localhost:5100", "stg"),
            tenant("3", "localhost:5100", ""),
        ]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_triple_rejected() {
        let config = config_with(vec![
            tenant("1", "localhost:5100", "dev"),
            tenant("2", "localhost:5100", "dev"),
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::DuplicateTriple { .. }
        ));
    }

    #[test]
    fn test_duplicate_fallback_rejected() {
        let config = config_with(vec![
            tenant("1", "localhost:5100", ""),
            tenant("2", "localhost:5100", ""),
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::DuplicateFallback { .. }
        ));
    }

    #[test]
    fn test_slash_in_virtual_path_rejected() {
        let config = config_with(vec![tenant("1", "localhost:5100", "dev/api")]);
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::VirtualPathContainsSlash { .. }
        ));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = config_with(vec![
            tenant("", "localhost:5100", "a/b"),
            tenant("2", "localhost:5100", "dev"),
            tenant("2", "localhost:5100", "dev"),
        ]);
        config.listener.bind_address = "not-an-address".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_same_virtual_path_on_different_hosts_allowed() {
        let config = config_with(vec![
            tenant("1", "a.example.com", "dev"),
            tenant("2", "b.example.com", "dev"),
        ]);
        assert!(validate_config(&config).is_ok());
    }
}
