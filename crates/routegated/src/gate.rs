//! The gating middleware.
//!
//! Translates engine decisions into HTTP: `Allow` continues into the
//! inner router, `Redirect` becomes a 307 to the resolved path. Static
//! assets and API-internal paths bypass the gate entirely; the engine
//! is never invoked for them.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;
use tracing::trace;

use routegate_core::Decision;
use routegate_engine::GateEngine;
use routegate_health::HealthMonitor;

/// Path prefixes the gate never evaluates.
const BYPASS_PREFIXES: &[&str] = &["/api/", "/static/", "/_assets/"];
/// Exact paths the gate never evaluates.
const BYPASS_EXACT: &[&str] = &["/favicon.ico", "/robots.txt"];

/// Shared state for the gate layer.
#[derive(Clone)]
pub struct GateState {
    pub engine: Arc<GateEngine>,
    pub monitor: Arc<HealthMonitor>,
    /// Name of the session cookie.
    pub cookie: String,
}

/// Mount the gate over an inner application router.
pub fn build_router(state: GateState, app: Router) -> Router {
    app.layer(axum::middleware::from_fn_with_state(state, gate))
}

/// The middleware itself: one decision per request.
async fn gate(State(state): State<GateState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if bypassed(&path) {
        trace!(path, "gate bypassed");
        return next.run(req).await;
    }

    let blob = cookie_value(req.headers(), &state.cookie);
    let healthy = state.monitor.check().await;

    match state.engine.decide(&path, blob.as_deref(), healthy) {
        Decision::Allow => next.run(req).await,
        Decision::Redirect(target) => Redirect::temporary(&target).into_response(),
    }
}

/// Whether a path is outside the gate's jurisdiction.
fn bypassed(path: &str) -> bool {
    BYPASS_EXACT.contains(&path) || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Extract a named cookie's raw value from the Cookie header.
///
/// The value is the opaque session blob; it is handed to the engine
/// as-is and any damage to it reads as an anonymous session.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bypass_covers_assets_and_api() {
        assert!(bypassed("/api/v1/users"));
        assert!(bypassed("/static/app.css"));
        assert!(bypassed("/_assets/chunk.js"));
        assert!(bypassed("/favicon.ico"));

        assert!(!bypassed("/"));
        assert!(!bypassed("/dashboard"));
        assert!(!bypassed("/apiary"));
    }

    #[test]
    fn cookie_value_finds_the_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; gate-session={\"a\":1}; lang=en"),
        );

        assert_eq!(
            cookie_value(&headers, "gate-session"),
            Some("{\"a\":1}".to_string())
        );
        assert_eq!(cookie_value(&headers, "lang"), Some("en".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn cookie_value_without_header_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "gate-session"), None);
    }
}
