//! Path rewriting: strip the tenant's virtual-path prefix.

use axum::http::uri::{PathAndQuery, Uri};
use std::str::FromStr;

use crate::tenancy::tenant::Tenant;

/// Remove the leading `/<virtual_path>` segment from `path`.
///
/// No-op for fallback tenants (empty virtual path). Joining zero remaining
/// segments still yields "/", so `/dev` and `/dev/` both rewrite to "/".
pub fn rewrite_path(path: &str, tenant: &Tenant) -> String {
    if tenant.virtual_path.is_empty() {
        return path.to_string();
    }

    // Drop the empty element before the first slash and the virtual-path
    // segment itself, then rejoin what remains.
    let remainder: Vec<&str> = path.split('/').skip(2).collect();
    format!("/{}", remainder.join("/"))
}

/// Rebuild `uri` with the rewritten path. Query string and authority are
/// carried over untouched.
pub fn rewrite_uri(uri: &Uri, tenant: &Tenant) -> Uri {
    if tenant.virtual_path.is_empty() {
        return uri.clone();
    }

    let new_path = rewrite_path(uri.path(), tenant);
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", new_path, query),
        None => new_path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = PathAndQuery::from_str(&path_and_query).ok();
    Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
}
