//! # riskwatch-triage
//!
//! Alert triage engine. Enforces the alert lifecycle locally (invalid
//! transitions never reach the network) and consumes backend-computed
//! aggregates. All remote calls go through the session gateway.

pub mod engine;
pub mod lifecycle;
pub mod statistics;

pub use engine::AlertTriage;
pub use lifecycle::validate_transition;
pub use statistics::AlertStatistics;
