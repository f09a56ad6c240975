//! Multi-tenant HTTP gateway library.
//!
//! Resolves each inbound request to a tenant by (scheme, host, first path
//! segment), strips the tenant's virtual-path prefix, and binds the tenant
//! into request-scoped context before application handlers run.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tenancy;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tenancy::{ResolvedTenant, Tenant, TenantRegistry};
