//! Client configuration.

pub mod client_config;
pub mod defaults;

pub use client_config::ClientConfig;
