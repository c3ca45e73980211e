//! routegated — the gate as an axum layer.
//!
//! The library half exposes the middleware so integration tests (and
//! embedders) can mount the gate over their own router; the binary
//! half wires it to a config file and serves it.

pub mod gate;

pub use gate::{build_router, GateState};
