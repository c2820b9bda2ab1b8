//! QuickPlate Client - ordering core for table-side diners
//!
//! Resolves the restaurant from the host name, loads its menu and the
//! diner's table, keeps a persisted cart, submits orders and tracks their
//! status. Storage is reached through [`OrderingBackend`], with an HTTP
//! implementation for plate-cloud and an in-memory one for tests.

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod submit;
pub mod tenant;
pub mod tracker;

pub use backend::{HttpBackend, MemoryBackend, OrderingBackend, SharedBackend};
pub use cart::{CartLine, CartStorage, CartStore, FileCartStorage, MemoryCartStorage};
pub use catalog::{Catalog, CatalogFetcher};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::OrderingSession;
pub use submit::OrderSubmitter;
pub use tenant::{TenantContext, TenantResolver};
pub use tracker::{StatusChange, StatusTracker, TrackerConfig, TrackerHandle};

// Re-export shared types for convenience
pub use shared::{CategoryFilter, DiningTable, MenuCategory, MenuItem, Order, OrderStatus, Tenant};
