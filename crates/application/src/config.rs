//! Client configuration.

use serde::{Deserialize, Serialize};

use greentek_domain::DEFAULT_EXPIRY_SKEW_SECS;

/// Default request timeout.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for an [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Seconds before nominal expiry at which an access token is
    /// treated as expired.
    pub expiry_skew_secs: i64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the
    /// base URL. A trailing slash on the base URL is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            expiry_skew_secs: DEFAULT_EXPIRY_SKEW_SECS,
            user_agent: concat!("greentek-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the expiry skew.
    #[must_use]
    pub const fn with_expiry_skew_secs(mut self, skew_secs: i64) -> Self {
        self.expiry_skew_secs = skew_secs;
        self
    }
}
