/// Credential store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential store I/O error: {reason}")]
    Io { reason: String },

    #[error("credential store holds malformed data: {reason}")]
    Malformed { reason: String },
}
