//! Customer-facing endpoints, scoped by the tenant id in the path

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::money;
use shared::util::now_millis;
use shared::{DiningTable, MenuItem, NewOrder, Order, OrderItem, Tenant};

use super::ApiResult;
use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

/// GET /api/tenants?subdomain=
#[derive(Deserialize)]
pub struct TenantQuery {
    pub subdomain: String,
}

pub async fn find_tenants(
    State(state): State<AppState>,
    Query(query): Query<TenantQuery>,
) -> ApiResult<Vec<Tenant>> {
    let subdomain = query.subdomain.trim().to_ascii_lowercase();
    let tenants = db::tenants::find_by_subdomain(&state.pool, &subdomain).await?;
    Ok(Json(tenants))
}

async fn require_tenant(state: &AppState, tenant_id: &str) -> ServiceResult<Tenant> {
    db::tenants::find_by_id(&state.pool, tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::TenantNotFound)
                .with_detail("tenant_id", tenant_id)
                .into()
        })
}

/// GET /api/tenants/{tenant_id}/menu
pub async fn get_menu(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> ApiResult<Vec<MenuItem>> {
    require_tenant(&state, &tenant_id).await?;
    let items = db::menu_items::list_active(&state.pool, &tenant_id).await?;
    Ok(Json(items))
}

/// GET /api/tenants/{tenant_id}/tables/{table_id}
pub async fn get_table(
    State(state): State<AppState>,
    Path((tenant_id, table_id)): Path<(String, i64)>,
) -> ApiResult<DiningTable> {
    let table = db::tables::find(&state.pool, &tenant_id, table_id)
        .await?
        .ok_or_else(|| AppError::table_not_found(table_id))?;
    Ok(Json(table))
}

/// POST /api/tenants/{tenant_id}/orders
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Optional echo of the path tenant; must match when present
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub table_id: i64,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
}

/// Check a create request against the order invariants
pub fn validate_order(tenant_id: &str, req: CreateOrderRequest) -> Result<NewOrder, AppError> {
    if req.tenant_id.as_deref().is_some_and(|t| t != tenant_id) {
        return Err(AppError::permission_denied(
            "Order tenant does not match the addressed restaurant",
        ));
    }
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in &req.items {
        if item.quantity == 0 || item.quantity > money::MAX_LINE_QUANTITY {
            return Err(AppError::new(ErrorCode::OrderInvalidQuantity).with_detail("item_id", item.id));
        }
        if !money::is_valid_price(item.price) {
            return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("item_id", item.id));
        }
    }

    let order = NewOrder {
        tenant_id: tenant_id.to_string(),
        table_id: req.table_id,
        items: req.items,
        total: req.total,
    };
    if !order.total_matches() {
        return Err(AppError::new(ErrorCode::OrderTotalMismatch)
            .with_detail("total", order.total.to_string())
            .with_detail("expected", shared::order::items_total(&order.items).to_string()));
    }
    Ok(order)
}

/// First requested id that is not an active menu item of the tenant
///
/// `available` holds `(id, is_active)` for the tenant's rows among the
/// requested ids.
fn first_unavailable(item_ids: &[i64], available: &[(i64, bool)]) -> Option<i64> {
    item_ids.iter().copied().find(|id| {
        !available
            .iter()
            .any(|&(item_id, is_active)| item_id == *id && is_active)
    })
}

pub async fn create_order(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ServiceError> {
    let new_order = validate_order(&tenant_id, req)?;
    require_tenant(&state, &tenant_id).await?;

    let mut tx = state.pool.begin().await?;

    if !db::tables::exists_tx(&mut tx, &tenant_id, new_order.table_id).await? {
        return Err(AppError::table_not_found(new_order.table_id).into());
    }

    let item_ids: Vec<i64> = new_order.items.iter().map(|i| i.id).collect();
    let available = db::menu_items::availability_tx(&mut tx, &tenant_id, &item_ids).await?;
    if let Some(missing) = first_unavailable(&item_ids, &available) {
        return Err(AppError::new(ErrorCode::MenuItemNotFound)
            .with_detail("item_id", missing)
            .into());
    }

    let order = db::orders::insert_tx(&mut tx, &new_order, now_millis()).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        tenant_id = %order.tenant_id,
        table_id = order.table_id,
        total = %order.total,
        "Order created"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/tenants/{tenant_id}/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path((tenant_id, order_id)): Path<(String, i64)>,
) -> ApiResult<Order> {
    let order = db::orders::find(&state.pool, &tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    Ok(Json(order))
}
