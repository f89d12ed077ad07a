//! Error taxonomy for the riskwatch client, split per subsystem.

mod auth_error;
mod store_error;
mod transport_error;
mod triage_error;

pub use auth_error::AuthError;
pub use store_error::StoreError;
pub use transport_error::TransportError;
pub use triage_error::TriageError;

/// Top-level error type unifying all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias used throughout the workspace.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Whether this error means the session is gone and the user must
    /// log in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::Auth(AuthError::SessionExpired))
    }
}
