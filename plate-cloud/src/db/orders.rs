//! Order persistence
//!
//! Items are stored as a JSONB snapshot; the row is written once and only
//! its status changes afterwards.

use rust_decimal::Decimal;
use shared::{NewOrder, Order, OrderItem, OrderStatus};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

const ORDER_COLUMNS: &str = "id, tenant_id, table_id, items, total, status, created_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    tenant_id: String,
    table_id: i64,
    items: Json<Vec<OrderItem>>,
    total: Decimal,
    status: String,
    created_at: i64,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            table_id: row.table_id,
            items: row.items.0,
            total: row.total,
            status: OrderStatus::parse(&row.status),
            created_at: row.created_at,
        }
    }
}

pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    order: &NewOrder,
    now: i64,
) -> Result<Order, sqlx::Error> {
    let row: OrderRow = sqlx::query_as(&format!(
        "INSERT INTO orders (tenant_id, table_id, items, total, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, 'received', $5, $5)
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(&order.tenant_id)
    .bind(order.table_id)
    .bind(Json(&order.items))
    .bind(order.total)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row.into())
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    order_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND tenant_id = $2"
    ))
    .bind(order_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Order::from))
}

/// Newest first, optionally filtered by status
pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    status: Option<OrderStatus>,
    limit: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders
         WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR status = $2)
         ORDER BY created_at DESC, id DESC
         LIMIT $3"
    ))
    .bind(tenant_id)
    .bind(status.map(|s| s.as_str()))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Order::from).collect())
}

pub async fn count_with_status(
    pool: &PgPool,
    tenant_id: &str,
    status: OrderStatus,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM orders WHERE tenant_id = $1 AND status = $2")
            .bind(tenant_id)
            .bind(status.as_str())
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Compare-and-set the status; `None` when the row no longer has `from`
pub async fn update_status_if(
    pool: &PgPool,
    tenant_id: &str,
    order_id: i64,
    from: OrderStatus,
    to: OrderStatus,
    now: i64,
) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> = sqlx::query_as(&format!(
        "UPDATE orders SET status = $4, updated_at = $5
         WHERE id = $1 AND tenant_id = $2 AND status = $3
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(order_id)
    .bind(tenant_id)
    .bind(from.as_str())
    .bind(to.as_str())
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Order::from))
}
