//! Default values for client configuration.

/// Fixed per-request deadline, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Base path prefix for all backend endpoints.
pub const DEFAULT_BASE_URL: &str = "/api";
