//! Database access layer
//!
//! Every query except the subdomain lookup filters on `tenant_id`.

pub mod menu_items;
pub mod orders;
pub mod tables;
pub mod tenants;
