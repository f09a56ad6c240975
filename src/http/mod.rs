//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → tenancy::middleware (resolve → rewrite → bind, or 404)
//!     → handlers.rs (application routes, tenant in scope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
