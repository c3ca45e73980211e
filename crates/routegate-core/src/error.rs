//! Error types for gate configuration.
//!
//! Configuration problems are the only fatal error class: everything
//! else the gate sees at request time degrades to a safe default
//! instead of surfacing an error.

use thiserror::Error;

/// Result type alias for configuration loading and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or validating `gate.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("upstream.health_url is required (set it in gate.toml or via ROUTEGATE_HEALTH_URL)")]
    MissingHealthUrl,

    #[error("upstream.health_url is not a usable http URL: {0}")]
    InvalidHealthUrl(String),

    #[error("routes.{0} must list at least one path")]
    EmptyRouteSet(String),

    #[error("route path must be absolute (start with '/'): {0}")]
    RelativePath(String),

    #[error("invalid duration string for {field}: {value:?}")]
    BadDuration { field: String, value: String },
}
