//! Transport boundary — requests as immutable values over an abstract
//! HTTP carrier.

pub mod http;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;
use riskwatch_core::errors::ClientResult;

pub use http::HttpTransport;
pub use protocol::{ApiRequest, ApiResponse, Method};

/// Generic HTTP carrier. Implementations deliver a request and report
/// the outcome: any HTTP status is an `Ok` response; only failures to
/// obtain a response at all (connectivity, timeout) are errors.
#[async_trait]
pub trait ITransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

#[async_trait]
impl<T: ITransport> ITransport for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        (**self).execute(request).await
    }
}
