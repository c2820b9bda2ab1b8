//! Shared types for QuickPlate
//!
//! Typed records exchanged between the ordering client and the cloud
//! service, decimal money helpers, and the unified error system.

pub mod error;
pub mod models;
pub mod money;
pub mod order;
pub mod util;

pub use models::{CategoryFilter, DiningTable, MenuCategory, MenuItem, Tenant};
pub use order::{NewOrder, Order, OrderItem, OrderStatus};
