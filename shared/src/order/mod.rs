//! Order records
//!
//! - [`OrderStatus`]: the monotonic lifecycle `received → preparing → ready`
//! - [`OrderItem`]: one line of the immutable item snapshot
//! - [`NewOrder`]: the single-row insert payload
//! - [`Order`]: a placed order as stored by the backend

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{NewOrder, Order, OrderItem, items_total};
pub use types::OrderStatus;
