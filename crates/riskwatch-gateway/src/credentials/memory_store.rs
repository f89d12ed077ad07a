//! In-memory credential store for ephemeral sessions and tests.

use std::sync::Mutex;

use riskwatch_core::errors::ClientResult;
use riskwatch_core::models::CredentialPair;

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if a pair survived from a previous run.
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            inner: Mutex::new(Some(pair)),
        }
    }
}

impl super::ICredentialStore for MemoryCredentialStore {
    fn load(&self) -> ClientResult<Option<CredentialPair>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn save(&self, pair: &CredentialPair) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
