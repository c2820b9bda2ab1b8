//! Order status lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Transitions only move forward: `Received → Preparing → Ready`.
/// Any other wire value deserializes to [`OrderStatus::Unknown`] so a new
/// backend state never breaks an old client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Received,
    Preparing,
    Ready,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Parse a wire value; unrecognized strings map to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value {
            "received" => Self::Received,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Unknown => "unknown",
        }
    }

    /// Position in the lifecycle; `None` for unknown values
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Received => Some(0),
            Self::Preparing => Some(1),
            Self::Ready => Some(2),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.rank().is_some()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The single forward step, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready | Self::Unknown => None,
        }
    }

    /// True when `to` is strictly later in the lifecycle than `self`
    pub fn is_forward_to(&self, to: OrderStatus) -> bool {
        match (self.rank(), to.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }

    /// Customer-facing notification text; unknown statuses show nothing
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Received => Some("Order received!"),
            Self::Preparing => Some("Order is being prepared"),
            Self::Ready => Some("Order is ready for service"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
