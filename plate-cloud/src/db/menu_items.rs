use shared::MenuItem;
use sqlx::{PgPool, Postgres, Transaction};

/// Active menu of a tenant, ordered by category then sort order
pub async fn list_active(pool: &PgPool, tenant_id: &str) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, tenant_id, name, description, price, category, is_active
        FROM menu_items
        WHERE tenant_id = $1 AND is_active
        ORDER BY category, sort_order, id
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

/// `(id, is_active)` for those of `item_ids` that are menu items of this tenant
pub async fn availability_tx(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: &str,
    item_ids: &[i64],
) -> Result<Vec<(i64, bool)>, sqlx::Error> {
    sqlx::query_as("SELECT id, is_active FROM menu_items WHERE tenant_id = $1 AND id = ANY($2)")
        .bind(tenant_id)
        .bind(item_ids)
        .fetch_all(&mut **tx)
        .await
}
