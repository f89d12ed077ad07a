//! Dashboard aggregates. The backend computes the counts; this side
//! only decodes them, attributing zero to any absent bucket.

use std::collections::HashMap;
use std::hash::Hash;

use riskwatch_core::models::{AlertSeverity, AlertStatus, AlertType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Alert counts grouped by status, severity, and detection type.
#[derive(Debug, Clone, Default)]
pub struct AlertStatistics {
    by_status: HashMap<AlertStatus, u64>,
    by_severity: HashMap<AlertSeverity, u64>,
    by_type: HashMap<AlertType, u64>,
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    status: AlertStatus,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SeverityRow {
    severity: AlertSeverity,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct TypeRow {
    alert_type: AlertType,
    count: u64,
}

impl AlertStatistics {
    /// Decode the statistics endpoint's row-list shape:
    /// `{"by_status": [{"status": "pending", "count": 3}], ...}`.
    /// Rows with values this client doesn't know are skipped, never
    /// fatal; a missing group decodes as empty.
    pub fn from_wire(body: &Value) -> Self {
        Self {
            by_status: buckets(body, "by_status", |row: StatusRow| (row.status, row.count)),
            by_severity: buckets(body, "by_severity", |row: SeverityRow| {
                (row.severity, row.count)
            }),
            by_type: buckets(body, "by_type", |row: TypeRow| (row.alert_type, row.count)),
        }
    }

    /// Count for a status bucket; 0 when absent.
    pub fn status_count(&self, status: AlertStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Count for a severity bucket; 0 when absent.
    pub fn severity_count(&self, severity: AlertSeverity) -> u64 {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Count for a detection-type bucket; 0 when absent.
    pub fn type_count(&self, alert_type: AlertType) -> u64 {
        self.by_type.get(&alert_type).copied().unwrap_or(0)
    }

    /// Alerts still awaiting triage.
    pub fn pending(&self) -> u64 {
        self.status_count(AlertStatus::Pending)
    }
}

fn buckets<K, R, F>(body: &Value, group: &str, key: F) -> HashMap<K, u64>
where
    K: Eq + Hash,
    R: DeserializeOwned,
    F: Fn(R) -> (K, u64),
{
    body.get(group)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|row| serde_json::from_value::<R>(row.clone()).ok())
        .map(key)
        .collect()
}
