//! Staff JWT authentication for the staff API
//!
//! Tokens are issued by the external identity provider. The `tenant_id`
//! claim must name the tenant that owns the request host.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::Tenant;
use shared::error::{AppError, ErrorCode};

use super::host::{request_host, resolve_host};
use crate::state::AppState;

/// JWT claims for staff authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Staff user ID
    pub sub: String,
    /// Tenant the staff member works for
    pub tenant_id: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated staff member, bound to the resolved tenant
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    pub staff_id: String,
    pub tenant: Tenant,
}

/// Verify a bearer token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<StaffClaims, AppError> {
    jsonwebtoken::decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Staff JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::new(ErrorCode::TokenExpired)
            }
            _ => AppError::invalid_token("Invalid staff token"),
        }
    })
}

/// Middleware: bearer token first, then the host tenant, then the claim match
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = {
        let token = request
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::not_authenticated().into_response())?;
        verify_token(token, &state.staff_jwt_secret).map_err(IntoResponse::into_response)?
    };

    let host = request_host(request.headers()).map(str::to_owned);
    let tenant = resolve_host(&state, host.as_deref())
        .await
        .map_err(IntoResponse::into_response)?;

    if claims.tenant_id != tenant.id {
        tracing::warn!(
            staff_id = %claims.sub,
            claim_tenant = %claims.tenant_id,
            host_tenant = %tenant.id,
            "Staff token used on another tenant's host"
        );
        return Err(AppError::permission_denied("Token does not belong to this restaurant")
            .into_response());
    }

    request.extensions_mut().insert(StaffIdentity {
        staff_id: claims.sub,
        tenant,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
pub(crate) fn create_token(staff_id: &str, tenant_id: &str, secret: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{EncodingKey, Header};

    let now = chrono::Utc::now();
    let claims = StaffClaims {
        sub: staff_id.to_string(),
        tenant_id: tenant_id.to_string(),
        exp: (now + chrono::Duration::seconds(ttl_secs)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
