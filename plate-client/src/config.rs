//! Client configuration

use crate::backend::HttpBackend;
use crate::tracker::TrackerConfig;
use crate::{ClientError, ClientResult};
use std::path::PathBuf;
use std::time::Duration;

/// Default persistence slot for the cart
pub const DEFAULT_CART_SLOT: &str = "quickplate-cart";

/// Client configuration for connecting to the QuickPlate backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Interval between order status polls
    pub poll_interval: Duration,

    /// Status changes buffered before the tracker waits on the consumer
    pub tracker_buffer: usize,

    /// Name of the persisted cart slot
    pub cart_slot: String,

    /// Directory for persisted carts; `None` keeps the cart in memory only
    pub storage_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            poll_interval: Duration::from_millis(1000),
            tracker_buffer: 16,
            cart_slot: DEFAULT_CART_SLOT.to_string(),
            storage_dir: None,
        }
    }

    /// Load configuration from `QUICKPLATE_*` environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | QUICKPLATE_API_URL | http://localhost:8080 |
    /// | QUICKPLATE_TIMEOUT_SECS | 30 |
    /// | QUICKPLATE_POLL_INTERVAL_MS | 1000 |
    /// | QUICKPLATE_CART_SLOT | quickplate-cart |
    /// | QUICKPLATE_STORAGE_DIR | (memory only) |
    pub fn from_env() -> ClientResult<Self> {
        let mut config = Self::new(
            std::env::var("QUICKPLATE_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Some(timeout) = env_number("QUICKPLATE_TIMEOUT_SECS")? {
            config.timeout = timeout;
        }
        if let Some(millis) = env_number("QUICKPLATE_POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(millis);
        }
        if let Ok(slot) = std::env::var("QUICKPLATE_CART_SLOT") {
            config.cart_slot = slot;
        }
        if let Ok(dir) = std::env::var("QUICKPLATE_STORAGE_DIR") {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the status poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the persisted cart slot name
    pub fn with_cart_slot(mut self, slot: impl Into<String>) -> Self {
        self.cart_slot = slot.into();
        self
    }

    /// Persist carts as files under this directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Reject settings no session can run with
    pub fn validate(&self) -> ClientResult<()> {
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config("poll interval must be positive".into()));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        if self.tracker_buffer == 0 {
            return Err(ClientError::Config("tracker buffer must be positive".into()));
        }
        if self.cart_slot.trim().is_empty() {
            return Err(ClientError::Config("cart slot must not be empty".into()));
        }
        Ok(())
    }

    /// Status tracker settings derived from this configuration
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            poll_interval: self.poll_interval,
            buffer: self.tracker_buffer,
        }
    }

    /// Create an HTTP backend from this configuration
    pub fn build_http_backend(&self) -> ClientResult<HttpBackend> {
        HttpBackend::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

fn env_number(key: &str) -> ClientResult<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{key} must be a number, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}
