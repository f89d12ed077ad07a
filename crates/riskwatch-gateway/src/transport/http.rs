//! Concrete transport over reqwest. Base URL and a fixed per-request
//! deadline are the only configuration.

use std::time::Duration;

use async_trait::async_trait;
use riskwatch_core::config::ClientConfig;
use riskwatch_core::errors::{ClientResult, TransportError};
use serde_json::Value;
use tracing::debug;

use super::protocol::{ApiRequest, ApiResponse, Method};
use super::ITransport;

/// Convert a reason string into a network error.
fn net_err(reason: String) -> TransportError {
    TransportError::Network { reason }
}

/// HTTP transport backed by a shared [`reqwest::Client`]. Performs no
/// retries of its own; retry policy belongs to the session gateway.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| net_err(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ITransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut req = self
            .client
            .request(method, &url)
            .header("X-Request-Id", &request.request_id);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }
        if let Some(ref token) = request.bearer {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| net_err(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| net_err(format!("failed to read response body: {e}")))?;

        // Empty bodies (e.g. the logout endpoint) decode as null.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        debug!(
            request_id = %request.request_id,
            path = %request.path,
            status,
            "http: request completed"
        );

        Ok(ApiResponse { status, body })
    }
}
