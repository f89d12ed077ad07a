/// Transport-level errors: connectivity failures and non-auth backend
/// rejections.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connectivity or timeout failure — the request may never have
    /// reached the backend.
    #[error("network error: {reason}")]
    Network { reason: String },

    /// Non-2xx, non-401 response, carrying the backend-provided message.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },
}
