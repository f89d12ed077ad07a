//! Session gateway tests: login, transparent refresh, retry bound,
//! session expiry, single-flight coordination.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use riskwatch_core::errors::{AuthError, ClientError, TransportError};
use riskwatch_core::models::CredentialPair;
use riskwatch_gateway::credentials::{ICredentialStore, MemoryCredentialStore};
use riskwatch_gateway::session::SessionGateway;
use riskwatch_gateway::transport::ApiRequest;
use serde_json::json;
use test_fixtures::{alert_body, ok_json, status_json, token_issue_body, FakeBackend};

const ALERTS: &str = "/risk/alerts/";
const REFRESH: &str = "/token/refresh/";

type TestGateway = SessionGateway<Arc<FakeBackend>, Arc<MemoryCredentialStore>>;

fn gateway(backend: &Arc<FakeBackend>, store: &Arc<MemoryCredentialStore>) -> TestGateway {
    SessionGateway::new(backend.clone(), store.clone()).unwrap()
}

/// Protected endpoint: answers 200 only for the given bearer token.
fn protect(backend: &FakeBackend, path: &str, accepted: &str) {
    let accepted = accepted.to_string();
    backend.route(path, move |request| {
        if request.bearer.as_deref() == Some(accepted.as_str()) {
            ok_json(json!([alert_body(1, "pending")]))
        } else {
            status_json(401, json!({ "detail": "token expired" }))
        }
    });
}

// ─── Login ─────────────────────────────────────────────────

#[tokio::test]
async fn test_login_sets_pair_and_protected_send_succeeds() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::new());
    backend.route_json("/token/", 200, token_issue_body("acc-1", "ref-1"));
    protect(&backend, ALERTS, "acc-1");

    let gw = gateway(&backend, &store);
    let user = gw.login("analyst@example.com", "secret").await.unwrap();
    assert_eq!(user.email, "analyst@example.com");
    assert!(gw.is_authenticated().await);
    assert_eq!(
        store.load().unwrap(),
        Some(CredentialPair::new("acc-1", "ref-1"))
    );

    let response = gw.send(ApiRequest::get(ALERTS)).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(backend.bearers_for(ALERTS), vec![Some("acc-1".to_string())]);
}

#[tokio::test]
async fn test_rejected_login_is_invalid_credentials() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::new());
    backend.route_json("/token/", 401, json!({ "error": "email or password incorrect" }));

    let gw = gateway(&backend, &store);
    let err = gw.login("analyst@example.com", "wrong").await.unwrap_err();
    match err {
        ClientError::Auth(AuthError::InvalidCredentials { reason }) => {
            assert_eq!(reason, "email or password incorrect")
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    assert!(!gw.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
    // A rejected login never triggers the refresh path.
    assert_eq!(backend.calls_to(REFRESH), 0);
}

// ─── Transparent refresh ───────────────────────────────────

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_transparently() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "stale", "ref-1",
    )));
    protect(&backend, ALERTS, "fresh");
    backend.route_json(REFRESH, 200, json!({ "access": "fresh" }));

    let gw = gateway(&backend, &store);
    let response = gw.send(ApiRequest::get(ALERTS)).await.unwrap();

    // The caller observes only the final success.
    assert_eq!(response.status, 200);
    assert_eq!(backend.calls_to(REFRESH), 1);
    assert_eq!(
        backend.bearers_for(ALERTS),
        vec![Some("stale".to_string()), Some("fresh".to_string())]
    );
    // The pair was replaced wholesale: new access, same refresh token.
    assert_eq!(
        store.load().unwrap(),
        Some(CredentialPair::new("fresh", "ref-1"))
    );
}

#[tokio::test]
async fn test_request_is_retried_at_most_once() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "stale", "ref-1",
    )));
    // Endpoint rejects every token, even the freshly issued one.
    backend.route_json(ALERTS, 401, json!({ "detail": "nope" }));
    backend.route_json(REFRESH, 200, json!({ "access": "fresh" }));

    let gw = gateway(&backend, &store);
    let err = gw.send(ApiRequest::get(ALERTS)).await.unwrap_err();
    assert!(err.is_session_expired());
    // Exactly one refresh and one resend, no loop.
    assert_eq!(backend.calls_to(REFRESH), 1);
    assert_eq!(backend.calls_to(ALERTS), 2);
}

// ─── Refresh failure ends the session ──────────────────────

#[tokio::test]
async fn test_refresh_failure_clears_pair_and_notifies() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "stale", "dead-ref",
    )));
    backend.route_json(ALERTS, 401, json!({ "detail": "token expired" }));
    backend.route_json(REFRESH, 401, json!({ "detail": "refresh token invalid" }));

    let gw = gateway(&backend, &store);
    let expirations = Arc::new(AtomicUsize::new(0));
    let counter = expirations.clone();
    gw.on_session_expired(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = gw.send(ApiRequest::get(ALERTS)).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(expirations.load(Ordering::SeqCst), 1);
    assert!(!gw.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);

    // Subsequent sends keep failing with SessionExpired without any
    // further refresh attempt, until a new login succeeds.
    let err = gw.send(ApiRequest::get(ALERTS)).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(backend.calls_to(REFRESH), 1);

    backend.route_json("/token/", 200, token_issue_body("acc-2", "ref-2"));
    protect(&backend, ALERTS, "acc-2");
    gw.login("analyst@example.com", "secret").await.unwrap();
    assert_eq!(gw.send(ApiRequest::get(ALERTS)).await.unwrap().status, 200);
}

// ─── Single-flight refresh ─────────────────────────────────

#[tokio::test]
async fn test_concurrent_expired_sends_share_one_refresh() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "stale", "ref-1",
    )));
    protect(&backend, ALERTS, "fresh");
    backend.route_json(REFRESH, 200, json!({ "access": "fresh" }));
    // Slow refresh so both callers observe the 401 before it finishes.
    backend.delay(REFRESH, Duration::from_millis(50));

    let gw = Arc::new(gateway(&backend, &store));
    let (a, b) = tokio::join!(
        gw.send(ApiRequest::get(ALERTS)),
        gw.send(ApiRequest::get(ALERTS)),
    );

    assert_eq!(a.unwrap().status, 200);
    assert_eq!(b.unwrap().status, 200);
    // The late arrival reused the first caller's refresh.
    assert_eq!(backend.calls_to(REFRESH), 1);
}

// ─── Logout ────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_revokes_and_clears() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "acc-1", "ref-1",
    )));
    backend.route_json("/logout/", 200, json!({ "message": "ok" }));

    let gw = gateway(&backend, &store);
    gw.logout().await;

    assert!(!gw.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
    let revoke = &backend.requests()[0];
    assert_eq!(revoke.path, "/logout/");
    assert_eq!(revoke.body.as_ref().unwrap()["refresh"], "ref-1");
}

#[tokio::test]
async fn test_logout_revoke_failure_is_swallowed() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "acc-1", "ref-1",
    )));
    backend.route_network_failure("/logout/", "connection refused");

    let gw = gateway(&backend, &store);
    // Never raises; local pair is cleared regardless of revoke outcome.
    gw.logout().await;
    assert!(!gw.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
}

// ─── Non-auth failures pass through unchanged ──────────────

#[tokio::test]
async fn test_backend_error_passes_through_without_retry() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        "acc-1", "ref-1",
    )));
    backend.route_json(ALERTS, 500, json!({ "detail": "database unavailable" }));

    let gw = gateway(&backend, &store);
    let err = gw.send(ApiRequest::get(ALERTS)).await.unwrap_err();
    match err {
        ClientError::Transport(TransportError::Backend { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
    assert_eq!(backend.calls_to(ALERTS), 1);
    assert_eq!(backend.calls_to(REFRESH), 0);
}

#[tokio::test]
async fn test_network_failure_passes_through_without_retry() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::new());
    backend.route_network_failure(ALERTS, "timed out");

    let gw = gateway(&backend, &store);
    let err = gw.send(ApiRequest::get(ALERTS)).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Network { .. })
    ));
    assert_eq!(backend.calls_to(ALERTS), 1);
}

// ─── Persistence across instances ──────────────────────────

#[tokio::test]
async fn test_session_survives_gateway_restart() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(MemoryCredentialStore::new());
    backend.route_json("/token/", 200, token_issue_body("acc-1", "ref-1"));
    protect(&backend, ALERTS, "acc-1");

    {
        let gw = gateway(&backend, &store);
        gw.login("analyst@example.com", "secret").await.unwrap();
    }

    // A new gateway over the same store picks up the persisted pair.
    let gw = gateway(&backend, &store);
    assert!(gw.is_authenticated().await);
    let response = gw.send(ApiRequest::get(ALERTS)).await.unwrap();
    assert_eq!(response.status, 200);
}
