//! Risk alert models — detected by the backend, triaged by a human.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A risk alert as served by the backend. Created by the detection
/// process; mutated only through triage transitions; never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub content: String,
    /// Name of the indicator that tripped, when the alert is metric-based.
    #[serde(default)]
    pub indicator_name: Option<String>,
    #[serde(default)]
    pub indicator_value: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
    pub status: AlertStatus,
    pub alert_time: DateTime<Utc>,
    /// Non-owning reference to the portfolio the alert concerns.
    #[serde(default)]
    pub portfolio: Option<PortfolioRef>,
    /// Set by the backend exactly when status leaves `pending`.
    #[serde(default)]
    pub handled_by: Option<HandlerRef>,
    #[serde(default)]
    pub handled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub handle_comment: Option<String>,
}

/// Lookup reference to a Portfolio entity owned elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRef {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Identity of the principal that handled an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRef {
    pub email: String,
}

/// What kind of detection produced the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Threshold,
    Anomaly,
    Limit,
    Trend,
}

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Triage status of an alert.
///
/// Initial state is `Pending`. `Resolved` and `Ignored` are terminal:
/// no transition is defined out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    Acknowledged,
    Resolved,
    Ignored,
}

impl AlertStatus {
    /// Whether the triage table defines a transition from `self` to
    /// `target`.
    ///
    /// | from         | to                               |
    /// |--------------|----------------------------------|
    /// | pending      | acknowledged, ignored, resolved  |
    /// | acknowledged | resolved                         |
    pub fn can_transition_to(self, target: AlertStatus) -> bool {
        use AlertStatus::*;
        matches!(
            (self, target),
            (Pending, Acknowledged) | (Pending, Ignored) | (Pending, Resolved) | (Acknowledged, Resolved)
        )
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, AlertStatus::Resolved | AlertStatus::Ignored)
    }

    /// Wire representation, matching the backend's snake_case values.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Pending => "pending",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Ignored => "ignored",
        }
    }

    /// All statuses, in lifecycle order.
    pub const ALL: [AlertStatus; 4] = [
        AlertStatus::Pending,
        AlertStatus::Acknowledged,
        AlertStatus::Resolved,
        AlertStatus::Ignored,
    ];
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Error => "error",
            AlertSeverity::Critical => "critical",
        }
    }

    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::Info,
        AlertSeverity::Warning,
        AlertSeverity::Error,
        AlertSeverity::Critical,
    ];
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::Threshold => "threshold",
            AlertType::Anomaly => "anomaly",
            AlertType::Limit => "limit",
            AlertType::Trend => "trend",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
