//! Client-local persistence for the credential pair.

pub mod file_store;
pub mod memory_store;

use std::sync::Arc;

use riskwatch_core::errors::ClientResult;
use riskwatch_core::models::CredentialPair;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;

/// Persistence for the credential pair across client restarts.
/// Written only by login, the refresh path, and logout.
pub trait ICredentialStore: Send + Sync {
    /// Load the persisted pair, if any.
    fn load(&self) -> ClientResult<Option<CredentialPair>>;

    /// Persist a pair, replacing any previous one wholesale.
    fn save(&self, pair: &CredentialPair) -> ClientResult<()>;

    /// Remove any persisted pair.
    fn clear(&self) -> ClientResult<()>;
}

impl<S: ICredentialStore> ICredentialStore for Arc<S> {
    fn load(&self) -> ClientResult<Option<CredentialPair>> {
        (**self).load()
    }

    fn save(&self, pair: &CredentialPair) -> ClientResult<()> {
        (**self).save(pair)
    }

    fn clear(&self) -> ClientResult<()> {
        (**self).clear()
    }
}
