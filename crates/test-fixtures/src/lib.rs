//! Shared test support for the riskwatch workspace: an in-process fake
//! backend implementing [`ITransport`], plus alert payload builders.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use riskwatch_core::errors::{ClientResult, TransportError};
use riskwatch_gateway::transport::{ApiRequest, ApiResponse, ITransport};
use serde_json::{json, Value};

type Handler = Box<dyn Fn(&ApiRequest) -> ClientResult<ApiResponse> + Send + Sync>;

/// Scriptable in-process backend. Routes are registered per path;
/// unrouted paths answer 404. Every delivered request is logged for
/// later assertions.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<String, Handler>>,
    delays: Mutex<HashMap<String, Duration>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a path.
    pub fn route(
        &self,
        path: &str,
        handler: impl Fn(&ApiRequest) -> ClientResult<ApiResponse> + Send + Sync + 'static,
    ) {
        self.lock(&self.routes)
            .insert(path.to_string(), Box::new(handler));
    }

    /// Register a fixed JSON response for a path.
    pub fn route_json(&self, path: &str, status: u16, body: Value) {
        self.route(path, move |_| {
            Ok(ApiResponse {
                status,
                body: body.clone(),
            })
        });
    }

    /// Make a path fail with a network error.
    pub fn route_network_failure(&self, path: &str, reason: &str) {
        let reason = reason.to_string();
        self.route(path, move |_| {
            Err(TransportError::Network {
                reason: reason.clone(),
            }
            .into())
        });
    }

    /// Delay delivery on a path, to widen concurrency race windows.
    pub fn delay(&self, path: &str, delay: Duration) {
        self.lock(&self.delays).insert(path.to_string(), delay);
    }

    /// Snapshot of every request delivered so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock(&self.log).clone()
    }

    /// How many requests hit the given path.
    pub fn calls_to(&self, path: &str) -> usize {
        self.lock(&self.log)
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Bearer tokens attached to each request on the given path.
    pub fn bearers_for(&self, path: &str) -> Vec<Option<String>> {
        self.lock(&self.log)
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.bearer.clone())
            .collect()
    }

    fn lock<'a, V>(&self, mutex: &'a Mutex<V>) -> std::sync::MutexGuard<'a, V> {
        mutex.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ITransport for FakeBackend {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let delay = self.lock(&self.delays).get(&request.path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.lock(&self.log).push(request.clone());
        let routes = self.lock(&self.routes);
        match routes.get(&request.path) {
            Some(handler) => handler(&request),
            None => Ok(ApiResponse {
                status: 404,
                body: json!({ "detail": "not found" }),
            }),
        }
    }
}

/// Success response helper.
pub fn ok_json(body: Value) -> ClientResult<ApiResponse> {
    Ok(ApiResponse { status: 200, body })
}

/// Error-status response helper.
pub fn status_json(status: u16, body: Value) -> ClientResult<ApiResponse> {
    Ok(ApiResponse { status, body })
}

/// A `POST /token/` response body for the given tokens.
pub fn token_issue_body(access: &str, refresh: &str) -> Value {
    json!({
        "access": access,
        "refresh": refresh,
        "user": {
            "id": 1,
            "email": "analyst@example.com",
            "department": "risk",
            "is_active": true
        }
    })
}

/// An alert payload in the backend's serializer shape.
pub fn alert_body(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "alert_type": "threshold",
        "severity": "warning",
        "title": format!("Alert {id}"),
        "content": "indicator crossed its threshold",
        "indicator_name": "max_drawdown",
        "indicator_value": -0.12,
        "threshold": -0.10,
        "status": status,
        "alert_time": Utc::now().to_rfc3339(),
        "portfolio": { "id": 1, "code": "P001", "name": "Growth" },
        "handled_by": null,
        "handled_at": null,
        "handle_comment": null
    })
}
