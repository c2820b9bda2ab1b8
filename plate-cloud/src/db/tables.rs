use shared::models::{DiningTable, TableOccupancy};
use sqlx::{PgPool, Postgres, Transaction};

/// Active table by id, scoped to the tenant
pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    table_id: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, tenant_id, table_number, is_active FROM dining_tables
         WHERE id = $1 AND tenant_id = $2 AND is_active",
    )
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

/// Same check as [`find`], inside an order transaction
pub async fn exists_tx(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: &str,
    table_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM dining_tables WHERE id = $1 AND tenant_id = $2 AND is_active",
    )
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row.is_some())
}

pub async fn count_active(pool: &PgPool, tenant_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM dining_tables WHERE tenant_id = $1 AND is_active")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Active tables with their number of orders not yet ready
pub async fn list_occupancy(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Vec<TableOccupancy>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.table_number, COUNT(o.id) AS open_orders
        FROM dining_tables t
        LEFT JOIN orders o
            ON o.table_id = t.id AND o.tenant_id = t.tenant_id AND o.status <> 'ready'
        WHERE t.tenant_id = $1 AND t.is_active
        GROUP BY t.id, t.table_number
        ORDER BY t.table_number
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}
