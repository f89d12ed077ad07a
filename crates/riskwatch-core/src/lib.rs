//! # riskwatch-core
//!
//! Foundation crate for the riskwatch dashboard client.
//! Defines all types, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use models::{Alert, AlertFilter, AlertSeverity, AlertStatus, AlertType, CredentialPair, UserProfile};
