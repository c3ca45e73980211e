//! Gating regression tests.
//!
//! Drives the full middleware stack (cookie extraction, health cache,
//! decision engine, redirect emission) through the router with
//! `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use routegate_core::config::RouteConfig;
use routegate_engine::{GateEngine, RouteTable};
use routegate_health::{HealthMonitor, ProbeFn, ProbeResult};
use routegated::{build_router, GateState};

fn fixed_probe(result: ProbeResult, count: Arc<AtomicUsize>) -> ProbeFn {
    Arc::new(move || {
        count.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { result })
    })
}

fn gated_app(result: ProbeResult, count: Arc<AtomicUsize>) -> Router {
    let state = GateState {
        engine: Arc::new(GateEngine::new(RouteTable::from_config(
            &RouteConfig::default(),
        ))),
        monitor: Arc::new(HealthMonitor::with_probe(
            Duration::from_secs(10),
            fixed_probe(result, count),
        )),
        cookie: "gate-session".to_string(),
    };
    build_router(state, Router::new().fallback(|| async { "ok" }))
}

fn request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn session_cookie(role: &str, profile_completed: bool) -> String {
    format!(
        r#"gate-session={{"subject":"u","credential":"t","role":"{role}","profile_completed":{profile_completed}}}"#
    )
}

fn location(resp: &axum::response::Response) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn guest_on_dashboard_is_redirected_to_login() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let resp = app.oneshot(request("/dashboard", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn guest_on_open_pages_passes_through() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    for path in ["/", "/login", "/other-page"] {
        let resp = app
            .clone()
            .oneshot(request(path, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn admin_on_login_is_forwarded_to_dashboard() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let cookie = session_cookie("admin", true);
    let resp = app
        .oneshot(request("/login", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
async fn incomplete_profile_on_home_is_sent_to_onboarding() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let cookie = session_cookie("standard", false);
    let resp = app.oneshot(request("/", Some(&cookie))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/onboarding");
}

#[tokio::test]
async fn finished_onboarding_is_forwarded_to_dashboard() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let cookie = session_cookie("standard", true);
    let resp = app
        .oneshot(request("/onboarding", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
async fn unhealthy_upstream_gates_everything_to_maintenance() {
    let app = gated_app(ProbeResult::Failed, Arc::new(AtomicUsize::new(0)));

    let cookie = session_cookie("admin", true);
    let resp = app
        .clone()
        .oneshot(request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/maintenance");

    // The maintenance page itself stays reachable.
    let resp = app.oneshot(request("/maintenance", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn recovered_upstream_evicts_from_maintenance() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let resp = app.oneshot(request("/maintenance", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn malformed_cookie_reads_as_guest() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let resp = app
        .oneshot(request("/dashboard", Some("gate-session={broken")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn bypassed_paths_skip_the_gate_and_the_probe() {
    let count = Arc::new(AtomicUsize::new(0));
    let app = gated_app(ProbeResult::Failed, count.clone());

    for path in ["/api/v1/users", "/static/app.css", "/favicon.ico"] {
        let resp = app.clone().oneshot(request(path, None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
    }
    // The engine was never consulted, so no probe ran.
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_verdict_is_cached_across_requests() {
    let count = Arc::new(AtomicUsize::new(0));
    let app = gated_app(ProbeResult::Healthy, count.clone());

    for _ in 0..5 {
        let resp = app.clone().oneshot(request("/", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn extra_cookies_do_not_confuse_extraction() {
    let app = gated_app(ProbeResult::Healthy, Arc::new(AtomicUsize::new(0)));

    let cookie = format!("theme=dark; {}; lang=en", session_cookie("admin", true));
    let resp = app.oneshot(request("/login", Some(&cookie))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/dashboard");
}
