//! # riskwatch-gateway
//!
//! Session gateway for the riskwatch dashboard client. Owns the
//! credential pair, attaches bearer tokens to every outbound call,
//! refreshes expired access tokens transparently (single-flight across
//! concurrent callers, at most one retry per logical request), and
//! surfaces every non-auth failure unchanged.
//!
//! All remote traffic from the rest of the workspace goes through
//! [`SessionGateway::send`].

pub mod credentials;
pub mod session;
pub mod transport;

pub use credentials::{FileCredentialStore, ICredentialStore, MemoryCredentialStore};
pub use session::{SessionExpiredCallback, SessionGateway};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ITransport, Method};
