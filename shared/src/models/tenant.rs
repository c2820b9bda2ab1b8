//! Tenant Model

use serde::{Deserialize, Serialize};

/// Tenant entity, one restaurant isolated by subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: String,
    pub subdomain: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Extract the tenant key (leftmost host label) from a host name.
///
/// The port and a trailing root dot are ignored and the label is lowercased.
/// Returns `None` for empty hosts, bracketed IPv6 literals and labels that
/// are not valid DNS labels.
pub fn subdomain_from_host(host: &str) -> Option<String> {
    let host = host.trim();
    if host.is_empty() || host.starts_with('[') {
        return None;
    }

    let without_port = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    let name = without_port.trim_end_matches('.');

    let label = name.split('.').next()?.to_ascii_lowercase();
    let valid = !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    valid.then_some(label)
}
