//! Tenant resolution from the request host

use shared::Tenant;
use shared::error::{AppError, ErrorCode};
use shared::models::subdomain_from_host;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// Host the client addressed, preferring the proxy-forwarded value
pub fn request_host(headers: &http::HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(http::header::HOST))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
}

/// Resolve a host to exactly one tenant by its leftmost label
pub async fn resolve_host(state: &AppState, host: Option<&str>) -> Result<Tenant, ServiceError> {
    let host = host.ok_or_else(|| AppError::new(ErrorCode::InvalidHost))?;
    let subdomain = subdomain_from_host(host)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidHost).with_detail("host", host))?;

    let mut tenants = db::tenants::find_by_subdomain(&state.pool, &subdomain).await?;
    match tenants.len() {
        0 => Err(AppError::tenant_not_found(subdomain).into()),
        1 => Ok(tenants.remove(0)),
        count => {
            tracing::error!(subdomain = %subdomain, count, "Subdomain matches several tenants");
            Err(AppError::new(ErrorCode::TenantAmbiguous)
                .with_detail("subdomain", subdomain)
                .into())
        }
    }
}
