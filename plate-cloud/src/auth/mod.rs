//! Request identity: tenant from the Host header, staff from a bearer token

pub mod host;
pub mod staff_auth;

pub use staff_auth::StaffIdentity;
