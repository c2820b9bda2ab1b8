//! Client error types

use shared::error::{ErrorCategory, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error body returned by the backend
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Backend answered with something that breaks the data contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend unavailable or failed without a structured body
    #[error("Backend error: {0}")]
    Backend(String),

    /// Host name has no usable leftmost label
    #[error("Invalid host name: {0}")]
    InvalidHost(String),

    /// No restaurant registered under this subdomain
    #[error("Restaurant not found for subdomain '{0}'")]
    TenantNotFound(String),

    /// More than one restaurant claims the subdomain
    #[error("Subdomain '{subdomain}' matches {count} restaurants")]
    AmbiguousTenant { subdomain: String, count: usize },

    /// Table absent or owned by another restaurant
    #[error("Table {0} not found")]
    TableNotFound(i64),

    /// Submission attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Shared error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) | Self::Backend(_) => ErrorCode::NetworkError,
            Self::Api { code, .. } => ErrorCode::try_from(*code).unwrap_or(ErrorCode::Unknown),
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::InvalidHost(_) => ErrorCode::InvalidHost,
            Self::TenantNotFound(_) => ErrorCode::TenantNotFound,
            Self::AmbiguousTenant { .. } => ErrorCode::TenantAmbiguous,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::EmptyCart => ErrorCode::OrderEmpty,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Errors that end the session: no restaurant context can be established
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidHost(_) | Self::TenantNotFound(_) | Self::AmbiguousTenant { .. }
        )
    }

    /// Errors where retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Backend(_) => true,
            Self::Api { .. } => self.code().category() == ErrorCategory::System,
            _ => false,
        }
    }

    /// Failures of the data store itself rather than of the request
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::Backend(_) | Self::InvalidResponse(_)
        )
    }

    /// Build from a structured backend error body
    pub(crate) fn api(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.code(),
            message: message.into(),
            details: None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
