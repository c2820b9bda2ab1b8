//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity, the physical ordering point a QR code links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub tenant_id: String,
    pub table_number: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl DiningTable {
    /// Display label, e.g. "Table 12"
    pub fn label(&self) -> String {
        format!("Table {}", self.table_number)
    }
}

/// Dining table with its live order count (staff occupancy view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableOccupancy {
    pub id: i64,
    pub table_number: i32,
    /// Orders at this table that are not yet ready
    pub open_orders: i64,
}

impl TableOccupancy {
    pub fn is_occupied(&self) -> bool {
        self.open_orders > 0
    }
}
