//! Tenant record definitions.

use serde::{Deserialize, Serialize};

/// A single tenant: one isolated routing context.
///
/// Tenants are loaded from configuration at startup and never mutated
/// afterwards. Matching compares `scheme`, `host`, and `virtual_path`
/// exactly; `name` is a human-readable label only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tenant {
    /// Opaque identifier, unique within the registry.
    pub id: String,

    /// Request scheme this tenant binds to (e.g. "http").
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Exact host header value, including port if present
    /// (e.g. "localhost:5100").
    pub host: String,

    /// First path segment that selects this tenant. Empty string marks the
    /// host's default (fallback) tenant. Never contains a "/".
    #[serde(default)]
    pub virtual_path: String,

    /// Display name, not used for matching.
    pub name: String,
}

fn default_scheme() -> String {
    "http".to_string()
}

impl Tenant {
    /// True if this tenant is the fallback for its (scheme, host) pair.
    pub fn is_fallback(&self) -> bool {
        self.virtual_path.is_empty()
    }

    /// True if this tenant matches the given triple exactly.
    pub fn matches(&self, scheme: &str, host: &str, virtual_path: &str) -> bool {
        self.scheme == scheme && self.host == host && self.virtual_path == virtual_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(virtual_path: &str) -> Tenant {
        Tenant {
            id: "1".to_string(),
            scheme: "http".to_string(),
            host: "localhost:5100".to_string(),
            virtual_path: virtual_path.to_string(),
            name: "Dev".to_string(),
        }
    }

    #[test]
    fn test_matches_exact_triple() {
        let t = tenant("dev");
        assert!(t.matches("http", "localhost:5100", "dev"));
        assert!(!t.matches("https", "localhost:5100", "dev"));
        assert!(!t.matches("http", "localhost:5200", "dev"));
        assert!(!t.matches("http", "localhost:5100", "stg"));
    }

    #[test]
    fn test_fallback_is_empty_virtual_path() {
        assert!(tenant("").is_fallback());
        assert!(!tenant("dev").is_fallback());
    }

    #[test]
    fn test_deserialize_defaults() {
        let t: Tenant = toml::from_str(
            r#"
            id = "1"
            host = "localhost:5100"
            name = "Default"
            "#,
        )
        .unwrap();
        assert_eq!(t.scheme, "http");
        assert!(t.virtual_path.is_empty());
    }
}
