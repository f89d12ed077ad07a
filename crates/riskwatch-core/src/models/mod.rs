//! Domain models mirrored from the backend's serializer output.

pub mod alert;
pub mod credentials;
pub mod filter;
pub mod user;

pub use alert::{Alert, AlertSeverity, AlertStatus, AlertType, HandlerRef, PortfolioRef};
pub use credentials::{CredentialPair, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use filter::AlertFilter;
pub use user::UserProfile;
