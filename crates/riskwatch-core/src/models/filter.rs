use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::alert::{AlertSeverity, AlertStatus, AlertType};

/// Filter predicates for alert listing. Forwarded to the backend as
/// query parameters, never evaluated locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
    pub alert_type: Option<AlertType>,
    pub portfolio: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AlertFilter {
    /// Everything, unfiltered.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_alert_type(mut self, alert_type: AlertType) -> Self {
        self.alert_type = Some(alert_type);
        self
    }

    pub fn with_portfolio(mut self, portfolio_id: i64) -> Self {
        self.portfolio = Some(portfolio_id);
        self
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Serialize to query parameters with the names the backend filters
    /// on. `alert_type` travels as `type`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.to_string()));
        }
        if let Some(severity) = self.severity {
            params.push(("severity".to_string(), severity.to_string()));
        }
        if let Some(alert_type) = self.alert_type {
            params.push(("type".to_string(), alert_type.to_string()));
        }
        if let Some(portfolio) = self.portfolio {
            params.push(("portfolio".to_string(), portfolio.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date".to_string(), start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date".to_string(), end.to_string()));
        }
        params
    }
}
