//! The triage engine: listings, aggregates, and status transitions,
//! all issued through the session gateway.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use riskwatch_core::errors::{ClientResult, TransportError};
use riskwatch_core::models::{Alert, AlertFilter, AlertStatus};
use riskwatch_gateway::credentials::ICredentialStore;
use riskwatch_gateway::session::SessionGateway;
use riskwatch_gateway::transport::ITransport;
use serde_json::{json, Value};
use tracing::debug;

use crate::lifecycle::validate_transition;
use crate::statistics::AlertStatistics;

const ALERTS_PATH: &str = "/risk/alerts/";
const PENDING_PATH: &str = "/risk/alerts/pending/";
const STATISTICS_PATH: &str = "/risk/alerts/statistics/";

/// Triage operations over the alert collection.
///
/// Keeps a snapshot of the last status seen per alert so a requested
/// transition can be validated before the mutating call goes out. A
/// failed call never updates the snapshot: no optimistic update
/// survives a failure.
pub struct AlertTriage<T: ITransport, S: ICredentialStore> {
    gateway: Arc<SessionGateway<T, S>>,
    statuses: RwLock<HashMap<i64, AlertStatus>>,
}

impl<T: ITransport, S: ICredentialStore> AlertTriage<T, S> {
    pub fn new(gateway: Arc<SessionGateway<T, S>>) -> Self {
        Self {
            gateway,
            statuses: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot-in-time listing. Filter predicates are forwarded to the
    /// backend, never evaluated locally.
    pub async fn list_alerts(&self, filter: &AlertFilter) -> ClientResult<Vec<Alert>> {
        let body: Value = self.gateway.get(ALERTS_PATH, filter.to_query()).await?;
        let alerts = parse_listing(body)?;
        self.remember(&alerts);
        Ok(alerts)
    }

    /// Shortcut for alerts still awaiting triage.
    pub async fn pending_alerts(&self) -> ClientResult<Vec<Alert>> {
        let body: Value = self.gateway.get(PENDING_PATH, Vec::new()).await?;
        let alerts = parse_listing(body)?;
        self.remember(&alerts);
        Ok(alerts)
    }

    /// Backend-computed counts by status, severity, and type.
    pub async fn statistics(&self) -> ClientResult<AlertStatistics> {
        let body: Value = self.gateway.get(STATISTICS_PATH, Vec::new()).await?;
        Ok(AlertStatistics::from_wire(&body))
    }

    /// Move an alert to `target`, validating against the transition
    /// table first — an invalid transition fails fast and issues no
    /// mutating call. The comment, when given, is stored verbatim as
    /// the handling note.
    pub async fn transition(
        &self,
        alert_id: i64,
        target: AlertStatus,
        comment: Option<&str>,
    ) -> ClientResult<Alert> {
        let current = self.current_status(alert_id).await?;
        validate_transition(current, target)?;

        let mut body = json!({ "status": target });
        if let Some(comment) = comment {
            body["handle_comment"] = json!(comment);
        }
        let updated: Alert = self
            .gateway
            .patch(&format!("{ALERTS_PATH}{alert_id}/"), body)
            .await?;

        debug!(alert_id, from = %current, to = %target, "triage: alert transitioned");
        self.remember(std::slice::from_ref(&updated));
        Ok(updated)
    }

    /// Last known status of the alert, reading it from the backend if
    /// no listing has surfaced it yet.
    async fn current_status(&self, alert_id: i64) -> ClientResult<AlertStatus> {
        let known = self
            .statuses
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&alert_id)
            .copied();
        if let Some(status) = known {
            return Ok(status);
        }

        let alert: Alert = self
            .gateway
            .get(&format!("{ALERTS_PATH}{alert_id}/"), Vec::new())
            .await?;
        self.remember(std::slice::from_ref(&alert));
        Ok(alert.status)
    }

    fn remember(&self, alerts: &[Alert]) {
        let mut statuses = self.statuses.write().unwrap_or_else(|e| e.into_inner());
        for alert in alerts {
            statuses.insert(alert.id, alert.status);
        }
    }
}

/// Accept both the paginated (`{"results": [...]}`) and bare-list
/// response shapes the backend serves.
fn parse_listing(body: Value) -> ClientResult<Vec<Alert>> {
    let items = match body {
        Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(items).map_err(|e| {
        TransportError::Network {
            reason: format!("deserialization failed: {e}"),
        }
        .into()
    })
}
