//! Order snapshot records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::money;

/// One line of an order's item snapshot
///
/// Copied from the cart at submission time; later menu edits never touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Menu item ID
    pub id: i64,
    pub name: String,
    /// Unit price at submission time
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        money::line_total(self.price, self.quantity)
    }
}

/// Exact total of an item snapshot
pub fn items_total(items: &[OrderItem]) -> Decimal {
    money::sum_lines(items.iter().map(|i| (i.price, i.quantity)))
}

/// Single-row insert payload for the orders entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub tenant_id: String,
    pub table_id: i64,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
}

impl NewOrder {
    /// Build the payload, computing the total from the snapshot
    pub fn new(tenant_id: impl Into<String>, table_id: i64, items: Vec<OrderItem>) -> Self {
        let total = items_total(&items);
        Self {
            tenant_id: tenant_id.into(),
            table_id,
            items,
            total,
        }
    }

    /// Whether `total` agrees with the item snapshot
    pub fn total_matches(&self) -> bool {
        items_total(&self.items) == self.total
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub tenant_id: String,
    pub table_id: i64,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
}
