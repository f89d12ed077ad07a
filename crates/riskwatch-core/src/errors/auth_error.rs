/// Authentication and session errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    /// The refresh path is exhausted; the caller must log in again.
    #[error("session expired")]
    SessionExpired,
}
