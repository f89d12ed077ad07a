use serde::{Deserialize, Serialize};

/// Key under which the access token is persisted client-side.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key under which the refresh token is persisted client-side.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// The client-held credential pair. Both tokens are opaque bearer
/// strings issued by the backend. Either the whole pair exists, or the
/// session holds no credentials at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived bearer credential attached to individual requests.
    pub access_token: String,
    /// Longer-lived credential exchanged for a new access token on expiry.
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// A copy of this pair with the access token replaced, as produced
    /// by a successful refresh.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}
