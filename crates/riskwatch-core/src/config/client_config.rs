use serde::{Deserialize, Serialize};

use super::defaults;

/// Backend client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    pub base_url: String,
    /// Per-request deadline in seconds. Exceeding it fails the call with
    /// a network error; the deadline is never retried.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Config pointing at the given base URL with default deadline.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
