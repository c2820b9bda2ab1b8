//! Data models
//!
//! Typed rows shared between plate-cloud and the ordering client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Tenant IDs are strings; table, menu item and order IDs are `i64`.

pub mod dining_table;
pub mod menu_item;
pub mod tenant;

// Re-exports
pub use dining_table::*;
pub use menu_item::*;
pub use tenant::*;
