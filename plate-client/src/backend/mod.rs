//! Data store access
//!
//! [`OrderingBackend`] is the seam between the ordering core and wherever
//! tenants, menus, tables and orders live. Every read and write is scoped
//! by tenant id except the subdomain lookup that discovers it.

mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

use crate::ClientResult;
use async_trait::async_trait;
use shared::{DiningTable, MenuItem, NewOrder, Order, Tenant};
use std::sync::Arc;

/// Backend handle shared by all ordering components
pub type SharedBackend = Arc<dyn OrderingBackend>;

/// Ordering backend trait
#[async_trait]
pub trait OrderingBackend: Send + Sync {
    /// All tenants registered under `subdomain` (normally zero or one)
    async fn find_tenants(&self, subdomain: &str) -> ClientResult<Vec<Tenant>>;

    /// Active menu items of a tenant
    async fn active_menu_items(&self, tenant_id: &str) -> ClientResult<Vec<MenuItem>>;

    /// A table by id, only if it belongs to `tenant_id`
    async fn find_table(&self, tenant_id: &str, table_id: i64)
    -> ClientResult<Option<DiningTable>>;

    /// Insert a new order; the backend assigns id, status and timestamp
    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order>;

    /// An order by id, only if it belongs to `tenant_id`
    async fn find_order(&self, tenant_id: &str, order_id: i64) -> ClientResult<Option<Order>>;
}
