use crate::models::AlertStatus;

/// Alert lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// The requested status change is not in the transition table.
    /// Raised before any network call is issued.
    #[error("invalid alert transition: {from} -> {to}")]
    InvalidTransition { from: AlertStatus, to: AlertStatus },
}
