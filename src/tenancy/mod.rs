//! Tenancy subsystem: request-to-tenant resolution and rewrite.
//!
//! # Data Flow
//! ```text
//! Request (scheme, host, path)
//!     → resolver.rs (first segment → registry lookup → host fallback)
//!     → rewrite.rs (strip /<virtual_path> prefix)
//!     → context.rs (tenant into request extensions)
//!     → application handlers
//! ```
//!
//! # Design Decisions
//! - Registry is an explicit instance shared via Arc, not a global
//! - Lookup is a full exact-match scan; the set is small and read-mostly
//! - First path segment matching is greedy (see resolver.rs)

pub mod context;
pub mod middleware;
pub mod registry;
pub mod resolver;
pub mod rewrite;
pub mod tenant;

pub use context::{ResolvedTenant, TenantRequestExt};
pub use registry::TenantRegistry;
pub use resolver::{resolve_for_request, Resolution, Unresolved};
pub use rewrite::{rewrite_path, rewrite_uri};
pub use tenant::Tenant;
