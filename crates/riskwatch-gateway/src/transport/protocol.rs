//! Wire-level request/response values. JSON bodies throughout.

use riskwatch_core::errors::{ClientResult, TransportError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP methods the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// One outbound call as an immutable value. The gateway clones the
/// request per attempt and reattaches the bearer token, so retry state
/// never lives on a shared object.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/risk/alerts/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer credential for this attempt; attached by the gateway.
    pub bearer: Option<String>,
    /// Unique ID for request tracing.
    pub request_id: String,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::Post, path);
        request.body = Some(body);
        request
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::Patch, path);
        request.body = Some(body);
        request
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// A delivered response: status code plus decoded JSON body (null when
/// the backend sent no body).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Authorization failure — the signal that drives the refresh path.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            TransportError::Network {
                reason: format!("deserialization failed: {e}"),
            }
            .into()
        })
    }

    /// Best-effort extraction of the backend-provided error message.
    /// The backend uses `error` for auth views and `detail` elsewhere.
    pub fn error_message(&self) -> String {
        for key in ["error", "detail", "message"] {
            if let Some(msg) = self.body.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
        self.body.to_string()
    }
}
