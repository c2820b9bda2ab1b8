//! API routes for plate-cloud

pub mod health;
pub mod public;
pub mod staff;

use crate::auth::staff_auth::staff_auth_middleware;
use crate::error::ServiceError;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub type ApiResult<T> = Result<Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Customer ordering (tenant id in the path)
    let public = Router::new()
        .route("/api/tenants", get(public::find_tenants))
        .route("/api/tenants/{tenant_id}/menu", get(public::get_menu))
        .route(
            "/api/tenants/{tenant_id}/tables/{table_id}",
            get(public::get_table),
        )
        .route("/api/tenants/{tenant_id}/orders", post(public::create_order))
        .route(
            "/api/tenants/{tenant_id}/orders/{order_id}",
            get(public::get_order),
        );

    // Staff (bearer JWT, tenant from Host)
    let staff = Router::new()
        .route("/api/staff/dashboard", get(staff::dashboard))
        .route("/api/staff/tables", get(staff::tables))
        .route("/api/staff/orders", get(staff::list_orders))
        .route(
            "/api/staff/orders/{order_id}/advance",
            post(staff::advance_order),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(staff)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
