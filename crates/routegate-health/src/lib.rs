//! routegate-health — debounced upstream liveness checking.
//!
//! Answers "is the upstream usable right now?" cheaply and boundedly.
//! A single probe result is cached for a TTL window so request latency
//! is not coupled to probe latency, and a failed probe is not retried
//! on every request during an outage.
//!
//! # Architecture
//!
//! ```text
//! HealthMonitor
//!   ├── cached (is_healthy, observed_at), TTL-bounded
//!   ├── probe fn (default: http_probe) → ProbeResult
//!   └── check() → bool   (refreshes synchronously when stale)
//! ```
//!
//! Concurrent requests that all observe a stale cache may each probe;
//! the last writer wins and every reader sees a consistent pair. That
//! redundancy is bounded by the TTL window and accepted.

pub mod checker;
pub mod monitor;

pub use checker::{http_probe, ProbeResult};
pub use monitor::{HealthMonitor, HealthState, ProbeFn};
