//! Tenant resolution from the request host

use crate::backend::SharedBackend;
use crate::{ClientError, ClientResult};
use shared::Tenant;
use shared::models::subdomain_from_host;

/// The restaurant a session is bound to
///
/// Only [`TenantResolver`] creates one, so holding a context means the
/// tenant was resolved against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant: Tenant,
}

impl TenantContext {
    pub(crate) fn new(tenant: Tenant) -> Self {
        Self { tenant }
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant.id
    }

    pub fn subdomain(&self) -> &str {
        &self.tenant.subdomain
    }

    /// Whether a record tagged with `tenant_id` belongs to this restaurant
    pub fn owns(&self, tenant_id: &str) -> bool {
        self.tenant.id == tenant_id
    }
}

/// Resolves the host name to exactly one tenant
pub struct TenantResolver {
    backend: SharedBackend,
}

impl TenantResolver {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Resolve `host` (e.g. `acme.quickplate.app`) to its tenant
    ///
    /// Zero matches is [`ClientError::TenantNotFound`], more than one is
    /// [`ClientError::AmbiguousTenant`]. Both are fatal for the session.
    pub async fn resolve(&self, host: &str) -> ClientResult<TenantContext> {
        let subdomain =
            subdomain_from_host(host).ok_or_else(|| ClientError::InvalidHost(host.to_string()))?;

        let mut matches: Vec<Tenant> = self
            .backend
            .find_tenants(&subdomain)
            .await?
            .into_iter()
            .filter(|t| t.subdomain.eq_ignore_ascii_case(&subdomain))
            .collect();

        match matches.len() {
            0 => {
                tracing::warn!(subdomain = %subdomain, "No restaurant for subdomain");
                Err(ClientError::TenantNotFound(subdomain))
            }
            1 => {
                let tenant = matches.remove(0);
                tracing::info!(tenant_id = %tenant.id, subdomain = %subdomain, "Tenant resolved");
                Ok(TenantContext::new(tenant))
            }
            count => {
                tracing::error!(subdomain = %subdomain, count, "Subdomain matches several restaurants");
                Err(ClientError::AmbiguousTenant { subdomain, count })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::sync::Arc;

    fn resolver(backend: MemoryBackend) -> TenantResolver {
        TenantResolver::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_resolve_single_match() {
        let backend = MemoryBackend::new();
        backend.add_tenant("t-a", "acme");
        backend.add_tenant("t-b", "bistro");

        let ctx = resolver(backend).resolve("acme.quickplate.app").await.unwrap();
        assert_eq!(ctx.tenant_id(), "t-a");
        assert_eq!(ctx.subdomain(), "acme");
        assert!(ctx.owns("t-a"));
        assert!(!ctx.owns("t-b"));
    }

    #[tokio::test]
    async fn test_resolve_ignores_case_and_port() {
        let backend = MemoryBackend::new();
        backend.add_tenant("t-a", "acme");
        let ctx = resolver(backend).resolve("Acme.QuickPlate.app:443").await.unwrap();
        assert_eq!(ctx.tenant_id(), "t-a");
    }

    #[tokio::test]
    async fn test_unknown_subdomain_is_fatal() {
        let err = resolver(MemoryBackend::new())
            .resolve("ghost.quickplate.app")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::TenantNotFound(ref s) if s == "ghost"));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_duplicate_subdomain_is_ambiguous() {
        let backend = MemoryBackend::new();
        backend.add_tenant("t-1", "twin");
        backend.add_tenant("t-2", "twin");
        let err = resolver(backend).resolve("twin.quickplate.app").await.unwrap_err();
        assert!(matches!(err, ClientError::AmbiguousTenant { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_invalid_host() {
        let err = resolver(MemoryBackend::new()).resolve("").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidHost(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = MemoryBackend::new();
        backend.fail_next_reads(1);
        let err = resolver(backend).resolve("acme.quickplate.app").await.unwrap_err();
        assert!(err.is_backend());
        assert!(!err.is_fatal());
    }
}
