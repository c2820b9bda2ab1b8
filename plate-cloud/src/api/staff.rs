//! Staff endpoints for the restaurant admin

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::TableOccupancy;
use shared::util::now_millis;
use shared::{Order, OrderStatus, Tenant};

use super::ApiResult;
use crate::auth::StaffIdentity;
use crate::db;
use crate::state::AppState;

const MAX_ORDERS_PAGE: i64 = 200;

/// GET /api/staff/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub tenant: Tenant,
    pub table_count: i64,
    /// Orders still in `received`
    pub pending_orders: i64,
    pub recent_orders: Vec<Order>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<DashboardResponse> {
    let tenant_id = identity.tenant.id.as_str();
    let table_count = db::tables::count_active(&state.pool, tenant_id).await?;
    let pending_orders =
        db::orders::count_with_status(&state.pool, tenant_id, OrderStatus::Received).await?;
    let recent_orders =
        db::orders::list(&state.pool, tenant_id, None, state.recent_orders_limit).await?;

    Ok(Json(DashboardResponse {
        tenant: identity.tenant,
        table_count,
        pending_orders,
        recent_orders,
    }))
}

/// GET /api/staff/tables
pub async fn tables(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<TableOccupancy>> {
    let tables = db::tables::list_occupancy(&state.pool, &identity.tenant.id).await?;
    Ok(Json(tables))
}

/// GET /api/staff/orders?status=&limit=
#[derive(Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

/// Parse the optional status filter; unknown values are rejected
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<OrderStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => match OrderStatus::parse(value) {
            OrderStatus::Unknown => Err(AppError::validation(format!(
                "Unknown order status '{value}'"
            ))
            .with_detail("status", value)),
            status => Ok(Some(status)),
        },
    }
}

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Vec<Order>> {
    let status = parse_status_filter(query.status.as_deref())?;
    let limit = query.limit.unwrap_or(50).clamp(1, MAX_ORDERS_PAGE);
    let orders = db::orders::list(&state.pool, &identity.tenant.id, status, limit).await?;
    Ok(Json(orders))
}

/// The single forward step from `current`
pub fn advance_target(current: OrderStatus) -> Result<OrderStatus, AppError> {
    match current {
        OrderStatus::Ready => Err(AppError::new(ErrorCode::OrderAlreadyReady)),
        status => status.next().ok_or_else(|| {
            AppError::new(ErrorCode::OrderStatusConflict).with_detail("status", status.as_str())
        }),
    }
}

/// POST /api/staff/orders/{order_id}/advance
pub async fn advance_order(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<Order> {
    let tenant_id = identity.tenant.id.as_str();
    let order = db::orders::find(&state.pool, tenant_id, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;

    let target = advance_target(order.status)?;
    let updated = db::orders::update_status_if(
        &state.pool,
        tenant_id,
        order_id,
        order.status,
        target,
        now_millis(),
    )
    .await?
    .ok_or_else(|| {
        AppError::new(ErrorCode::OrderStatusConflict).with_detail("order_id", order_id)
    })?;

    tracing::info!(
        order_id,
        tenant_id = %tenant_id,
        staff_id = %identity.staff_id,
        from = %order.status,
        to = %updated.status,
        "Order advanced"
    );
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_one_step() {
        assert_eq!(advance_target(OrderStatus::Received).unwrap(), OrderStatus::Preparing);
        assert_eq!(advance_target(OrderStatus::Preparing).unwrap(), OrderStatus::Ready);
    }

    #[test]
    fn test_advance_from_ready_conflicts() {
        let err = advance_target(OrderStatus::Ready).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAlreadyReady);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_advance_from_unknown_conflicts() {
        let err = advance_target(OrderStatus::Unknown).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderStatusConflict);
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("preparing")).unwrap(),
            Some(OrderStatus::Preparing)
        );
        let err = parse_status_filter(Some("served")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
