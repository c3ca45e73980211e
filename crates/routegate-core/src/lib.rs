//! routegate-core — domain types and configuration for the gate.
//!
//! Defines the vocabulary shared by the health monitor, the decision
//! engine, and the daemon: session claims, route classes, decisions,
//! and the `gate.toml` configuration with its fail-fast validation.

pub mod config;
pub mod error;
pub mod types;

pub use config::GateConfig;
pub use error::{ConfigError, ConfigResult};
pub use types::{Decision, Role, RouteClass, SessionClaims};
