//! JSON-file credential store — the client's durable token storage,
//! surviving restarts the way browser-local storage survives reloads.

use std::path::PathBuf;

use riskwatch_core::errors::{ClientResult, StoreError};
use riskwatch_core::models::{CredentialPair, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use serde_json::Value;

/// Stores the pair as a JSON object under the two fixed keys.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl super::ICredentialStore for FileCredentialStore {
    fn load(&self) -> ClientResult<Option<CredentialPair>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            reason: format!("{}: {e}", self.path.display()),
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            reason: e.to_string(),
        })?;

        let access = value.get(ACCESS_TOKEN_KEY).and_then(|v| v.as_str());
        let refresh = value.get(REFRESH_TOKEN_KEY).and_then(|v| v.as_str());
        match (access, refresh) {
            (Some(access), Some(refresh)) => Ok(Some(CredentialPair::new(access, refresh))),
            (None, None) => Ok(None),
            // One token without the other violates the pair invariant.
            _ => Err(StoreError::Malformed {
                reason: "credential pair is incomplete".into(),
            }
            .into()),
        }
    }

    fn save(&self, pair: &CredentialPair) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                reason: format!("{}: {e}", parent.display()),
            })?;
        }
        let value = serde_json::json!({
            ACCESS_TOKEN_KEY: pair.access_token,
            REFRESH_TOKEN_KEY: pair.refresh_token,
        });
        std::fs::write(&self.path, value.to_string()).map_err(|e| {
            StoreError::Io {
                reason: format!("{}: {e}", self.path.display()),
            }
            .into()
        })
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                reason: format!("{}: {e}", self.path.display()),
            }
            .into()),
        }
    }
}
