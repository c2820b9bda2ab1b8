use shared::Tenant;
use sqlx::PgPool;

/// All tenants with this subdomain (the column is unique, so at most one)
pub async fn find_by_subdomain(pool: &PgPool, subdomain: &str) -> Result<Vec<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT id, subdomain, name FROM tenants WHERE subdomain = $1")
        .bind(subdomain)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, tenant_id: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT id, subdomain, name FROM tenants WHERE id = $1")
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}
