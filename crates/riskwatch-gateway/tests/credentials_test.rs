//! Credential store tests: durability, the pair invariant, tolerance
//! of a missing file.

use riskwatch_core::errors::{ClientError, StoreError};
use riskwatch_core::models::CredentialPair;
use riskwatch_gateway::credentials::{FileCredentialStore, ICredentialStore};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("tokens.json"));

    assert_eq!(store.load().unwrap(), None);

    let pair = CredentialPair::new("acc-1", "ref-1");
    store.save(&pair).unwrap();
    assert_eq!(store.load().unwrap(), Some(pair.clone()));

    // A second store over the same path sees the persisted pair.
    let reopened = FileCredentialStore::new(dir.path().join("tokens.json"));
    assert_eq!(reopened.load().unwrap(), Some(pair));
}

#[test]
fn test_save_replaces_pair_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("tokens.json"));

    store.save(&CredentialPair::new("acc-1", "ref-1")).unwrap();
    store.save(&CredentialPair::new("acc-2", "ref-2")).unwrap();
    assert_eq!(
        store.load().unwrap(),
        Some(CredentialPair::new("acc-2", "ref-2"))
    );
}

#[test]
fn test_clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("tokens.json"));

    store.save(&CredentialPair::new("acc-1", "ref-1")).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    // Clearing an already-empty store is fine.
    store.clear().unwrap();
}

#[test]
fn test_incomplete_pair_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    // Access token without its refresh token violates the invariant.
    std::fs::write(&path, r#"{"access_token": "acc-only"}"#).unwrap();

    let store = FileCredentialStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(
        err,
        ClientError::Store(StoreError::Malformed { .. })
    ));
}

#[test]
fn test_garbage_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(matches!(
        store.load().unwrap_err(),
        ClientError::Store(StoreError::Malformed { .. })
    ));
}
