//! In-process backend
//!
//! Holds tenants, tables, menu items and orders in memory and enforces the
//! same write rules as the cloud server. Used by tests and local demos;
//! failure injection lets callers exercise the unavailable-backend paths.

use super::OrderingBackend;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::error::ErrorCode;
use shared::money;
use shared::util::now_millis;
use shared::{DiningTable, MenuItem, NewOrder, Order, OrderStatus, Tenant};

#[derive(Debug, Default)]
struct MemoryState {
    tenants: Vec<Tenant>,
    tables: Vec<DiningTable>,
    menu: Vec<MenuItem>,
    orders: Vec<Order>,
    last_order_id: i64,
    insert_calls: usize,
    failing_inserts: usize,
    failing_reads: usize,
}

impl MemoryState {
    fn take_read_failure(&mut self) -> ClientResult<()> {
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err(ClientError::Backend("injected read failure".into()));
        }
        Ok(())
    }
}

/// In-memory ordering backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant
    pub fn add_tenant(&self, id: impl Into<String>, subdomain: impl Into<String>) -> Tenant {
        let tenant = Tenant {
            id: id.into(),
            subdomain: subdomain.into(),
            name: None,
        };
        self.state.lock().tenants.push(tenant.clone());
        tenant
    }

    /// Register an active table owned by `tenant_id`
    pub fn add_table(&self, tenant_id: &str, id: i64, table_number: i32) -> DiningTable {
        let table = DiningTable {
            id,
            tenant_id: tenant_id.to_string(),
            table_number,
            is_active: true,
        };
        self.state.lock().tables.push(table.clone());
        table
    }

    /// Register a menu item as given, active or not
    pub fn add_menu_item(&self, item: MenuItem) {
        self.state.lock().menu.push(item);
    }

    /// Overwrite an order's status, as staff tooling would
    pub fn set_status(&self, order_id: i64, status: OrderStatus) -> bool {
        let mut state = self.state.lock();
        match state.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Move an order one step forward; returns the new status
    pub fn advance(&self, order_id: i64) -> Option<OrderStatus> {
        let mut state = self.state.lock();
        let order = state.orders.iter_mut().find(|o| o.id == order_id)?;
        let next = order.status.next()?;
        order.status = next;
        Some(next)
    }

    /// Snapshot of all stored orders
    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().orders.clone()
    }

    /// Number of insert attempts that reached the backend
    pub fn insert_calls(&self) -> usize {
        self.state.lock().insert_calls
    }

    /// Make the next `count` inserts fail as if the store were unreachable
    pub fn fail_next_inserts(&self, count: usize) {
        self.state.lock().failing_inserts = count;
    }

    /// Make the next `count` reads fail as if the store were unreachable
    pub fn fail_next_reads(&self, count: usize) {
        self.state.lock().failing_reads = count;
    }
}

#[async_trait]
impl OrderingBackend for MemoryBackend {
    async fn find_tenants(&self, subdomain: &str) -> ClientResult<Vec<Tenant>> {
        let mut state = self.state.lock();
        state.take_read_failure()?;
        Ok(state
            .tenants
            .iter()
            .filter(|t| t.subdomain == subdomain)
            .cloned()
            .collect())
    }

    async fn active_menu_items(&self, tenant_id: &str) -> ClientResult<Vec<MenuItem>> {
        let mut state = self.state.lock();
        state.take_read_failure()?;
        Ok(state
            .menu
            .iter()
            .filter(|m| m.tenant_id == tenant_id && m.is_active)
            .cloned()
            .collect())
    }

    async fn find_table(
        &self,
        tenant_id: &str,
        table_id: i64,
    ) -> ClientResult<Option<DiningTable>> {
        let mut state = self.state.lock();
        state.take_read_failure()?;
        Ok(state
            .tables
            .iter()
            .find(|t| t.id == table_id && t.tenant_id == tenant_id)
            .cloned())
    }

    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order> {
        let mut state = self.state.lock();
        state.insert_calls += 1;
        if state.failing_inserts > 0 {
            state.failing_inserts -= 1;
            return Err(ClientError::Backend("injected insert failure".into()));
        }

        if order.items.is_empty() {
            return Err(ClientError::api(ErrorCode::OrderEmpty, "Order has no items"));
        }
        if order
            .items
            .iter()
            .any(|i| i.quantity == 0 || i.quantity > money::MAX_LINE_QUANTITY)
        {
            return Err(ClientError::api(
                ErrorCode::OrderInvalidQuantity,
                "Quantity out of range",
            ));
        }
        if !order.total_matches() {
            return Err(ClientError::api(
                ErrorCode::OrderTotalMismatch,
                "Order total does not match items",
            ));
        }
        let owns_table = state
            .tables
            .iter()
            .any(|t| t.id == order.table_id && t.tenant_id == order.tenant_id);
        if !owns_table {
            return Err(ClientError::api(ErrorCode::TableNotFound, "Table not found"));
        }

        state.last_order_id += 1;
        let stored = Order {
            id: state.last_order_id,
            tenant_id: order.tenant_id.clone(),
            table_id: order.table_id,
            items: order.items.clone(),
            total: order.total,
            status: OrderStatus::Received,
            created_at: now_millis(),
        };
        state.orders.push(stored.clone());
        Ok(stored)
    }

    async fn find_order(&self, tenant_id: &str, order_id: i64) -> ClientResult<Option<Order>> {
        let mut state = self.state.lock();
        state.take_read_failure()?;
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == order_id && o.tenant_id == tenant_id)
            .cloned())
    }
}
