//! Session gateway — owns the credential pair, refreshes it
//! transparently, and retries each logical request at most once.

use std::sync::RwLock as StdRwLock;

use riskwatch_core::errors::{AuthError, ClientResult, TransportError};
use riskwatch_core::models::{CredentialPair, UserProfile};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::credentials::ICredentialStore;
use crate::transport::{ApiRequest, ApiResponse, ITransport};

/// Token-issue endpoint.
const TOKEN_PATH: &str = "/token/";
/// Token-refresh endpoint.
const TOKEN_REFRESH_PATH: &str = "/token/refresh/";
/// Refresh-token revocation endpoint.
const LOGOUT_PATH: &str = "/logout/";

/// Invoked when the refresh path is exhausted, so the hosting
/// application can navigate to its login surface. The gateway itself
/// never drives navigation.
pub type SessionExpiredCallback = Box<dyn Fn() + Send + Sync>;

/// `POST /token/` response body.
#[derive(Debug, Deserialize)]
struct TokenIssueResponse {
    access: String,
    refresh: String,
    user: UserProfile,
}

/// `POST /token/refresh/` response body.
#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access: String,
}

/// Credential state shared by all in-flight requests. The generation
/// counter advances on every credential change, letting a caller that
/// observed a 401 tell whether someone else already refreshed while it
/// waited for the refresh gate.
#[derive(Debug)]
struct SessionState {
    credentials: Option<CredentialPair>,
    generation: u64,
}

/// The single entry point for all remote calls.
///
/// Owns the credential pair as explicit per-instance state (no ambient
/// globals), loaded from the store at construction so a session
/// survives client restarts.
pub struct SessionGateway<T: ITransport, S: ICredentialStore> {
    transport: T,
    store: S,
    state: RwLock<SessionState>,
    /// Serializes refresh attempts: the first caller to observe expiry
    /// performs the refresh, late arrivals reuse its result.
    refresh_gate: Mutex<()>,
    expired_callback: StdRwLock<Option<SessionExpiredCallback>>,
}

impl<T: ITransport, S: ICredentialStore> SessionGateway<T, S> {
    /// Build a gateway, restoring any credential pair the store holds.
    pub fn new(transport: T, store: S) -> ClientResult<Self> {
        let credentials = store.load()?;
        Ok(Self {
            transport,
            store,
            state: RwLock::new(SessionState {
                credentials,
                generation: 0,
            }),
            refresh_gate: Mutex::new(()),
            expired_callback: StdRwLock::new(None),
        })
    }

    /// Register the session-expired notification. At most one callback
    /// is held; registering again replaces it.
    pub fn on_session_expired(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self
            .expired_callback
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(Box::new(callback));
    }

    /// Whether a credential pair is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credentials.is_some()
    }

    /// Exchange identifier/secret for a fresh credential pair.
    ///
    /// Deliberately bypasses the 401-retry path: a rejected login is
    /// `InvalidCredentials`, never a refresh trigger.
    pub async fn login(&self, identifier: &str, secret: &str) -> ClientResult<UserProfile> {
        let request = ApiRequest::post(
            TOKEN_PATH,
            json!({ "email": identifier, "password": secret }),
        );
        let response = self.transport.execute(request).await?;

        if response.is_unauthorized() {
            return Err(AuthError::InvalidCredentials {
                reason: response.error_message(),
            }
            .into());
        }
        if !response.is_success() {
            return Err(TransportError::Backend {
                status: response.status,
                message: response.error_message(),
            }
            .into());
        }

        let issued: TokenIssueResponse = response.json()?;
        self.replace_credentials(Some(CredentialPair::new(issued.access, issued.refresh)))
            .await?;
        info!(user = %issued.user.email, "session: login succeeded");
        Ok(issued.user)
    }

    /// Best-effort revoke of the refresh token, then clear local state.
    /// Never raises: revoke failures are logged, not propagated.
    pub async fn logout(&self) {
        let current = { self.state.read().await.credentials.clone() };

        if let Some(pair) = current {
            let request = ApiRequest::post(LOGOUT_PATH, json!({ "refresh": pair.refresh_token }))
                .with_bearer(pair.access_token);
            match self.transport.execute(request).await {
                Ok(response) if response.is_success() => {}
                Ok(response) => {
                    warn!(status = response.status, "session: logout revoke rejected")
                }
                Err(e) => warn!("session: logout revoke failed: {e}"),
            }
        }

        if let Err(e) = self.replace_credentials(None).await {
            warn!("session: failed to clear credential store: {e}");
        }
        info!("session: logged out");
    }

    /// Dispatch one request with transparent refresh.
    ///
    /// On a 401 the stored refresh token is exchanged for a new access
    /// token (coordinated so concurrent callers share one refresh) and
    /// the request is resent exactly once with the new credential. A
    /// second 401, or a failed refresh, ends the session. Every other
    /// outcome passes through unchanged.
    pub async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let (bearer, observed_generation) = {
            let state = self.state.read().await;
            (
                state
                    .credentials
                    .as_ref()
                    .map(|pair| pair.access_token.clone()),
                state.generation,
            )
        };

        let mut first = request.clone();
        if let Some(ref token) = bearer {
            first = first.with_bearer(token.clone());
        }
        let response = self.transport.execute(first).await?;
        if !response.is_unauthorized() {
            return Self::classify(response);
        }

        // Single retry for this logical request.
        debug!(
            request_id = %request.request_id,
            path = %request.path,
            "session: access token rejected, attempting refresh"
        );
        let fresh = self.refreshed_access_token(observed_generation).await?;
        let retried = request.with_bearer(fresh);
        let response = self.transport.execute(retried).await?;
        if response.is_unauthorized() {
            // Already retried once; no second refresh attempt.
            return Err(AuthError::SessionExpired.into());
        }
        Self::classify(response)
    }

    /// GET with typed deserialization.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<R> {
        let mut request = ApiRequest::get(path);
        if !query.is_empty() {
            request = request.with_query(query);
        }
        self.send(request).await?.json()
    }

    /// POST with typed deserialization.
    pub async fn post<R: DeserializeOwned>(&self, path: &str, body: Value) -> ClientResult<R> {
        self.send(ApiRequest::post(path, body)).await?.json()
    }

    /// PATCH with typed deserialization.
    pub async fn patch<R: DeserializeOwned>(&self, path: &str, body: Value) -> ClientResult<R> {
        self.send(ApiRequest::patch(path, body)).await?.json()
    }

    /// Map a delivered response to the caller-facing outcome. 401 never
    /// reaches this point.
    fn classify(response: ApiResponse) -> ClientResult<ApiResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Backend {
                status: response.status,
                message: response.error_message(),
            }
            .into())
        }
    }

    /// Obtain a valid access token after a 401, refreshing at most once
    /// across all concurrent callers (single-flight).
    ///
    /// `observed_generation` is the credential generation the caller's
    /// failed attempt used. If the generation advanced while waiting
    /// for the gate, another task already refreshed and its result is
    /// reused without a second refresh call.
    async fn refreshed_access_token(&self, observed_generation: u64) -> ClientResult<String> {
        let _gate = self.refresh_gate.lock().await;

        let pair = {
            let state = self.state.read().await;
            if state.generation != observed_generation {
                return match state.credentials {
                    Some(ref pair) => Ok(pair.access_token.clone()),
                    // A concurrent refresh failed and cleared the pair.
                    None => Err(AuthError::SessionExpired.into()),
                };
            }
            match state.credentials {
                Some(ref pair) => pair.clone(),
                // 401 without stored credentials: nothing to refresh.
                None => return Err(AuthError::SessionExpired.into()),
            }
        };

        let request = ApiRequest::post(
            TOKEN_REFRESH_PATH,
            json!({ "refresh": pair.refresh_token }),
        );
        let refreshed = match self.transport.execute(request).await {
            Ok(response) if response.is_success() => {
                response.json::<TokenRefreshResponse>().ok()
            }
            Ok(response) => {
                warn!(status = response.status, "session: refresh rejected");
                None
            }
            Err(e) => {
                warn!("session: refresh request failed: {e}");
                None
            }
        };

        match refreshed {
            Some(token) => {
                let renewed = pair.with_access_token(token.access);
                let access = renewed.access_token.clone();
                self.replace_credentials(Some(renewed)).await?;
                info!("session: access token refreshed");
                Ok(access)
            }
            None => {
                if let Err(e) = self.replace_credentials(None).await {
                    warn!("session: failed to clear credential store: {e}");
                }
                self.notify_session_expired();
                Err(AuthError::SessionExpired.into())
            }
        }
    }

    /// Replace or clear the pair, advance the generation, and persist.
    async fn replace_credentials(&self, pair: Option<CredentialPair>) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.credentials = pair.clone();
            state.generation += 1;
        }
        match pair {
            Some(ref pair) => self.store.save(pair),
            None => self.store.clear(),
        }
    }

    fn notify_session_expired(&self) {
        let callback = self
            .expired_callback
            .read()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(ref callback) = *callback {
            callback();
        }
    }
}
