//! Alert lifecycle enforcement.
//!
//! The transition table lives on [`AlertStatus`]; this module turns a
//! disallowed pair into the error callers see, before any network call
//! is issued.

use riskwatch_core::errors::TriageError;
use riskwatch_core::models::AlertStatus;

/// Check a requested status change against the transition table.
pub fn validate_transition(from: AlertStatus, to: AlertStatus) -> Result<(), TriageError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(TriageError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledged_alert_can_be_resolved() {
        assert!(validate_transition(AlertStatus::Acknowledged, AlertStatus::Resolved).is_ok());
    }

    #[test]
    fn ignored_alert_is_final() {
        let err = validate_transition(AlertStatus::Ignored, AlertStatus::Resolved).unwrap_err();
        assert!(matches!(
            err,
            TriageError::InvalidTransition {
                from: AlertStatus::Ignored,
                to: AlertStatus::Resolved
            }
        ));
    }
}
