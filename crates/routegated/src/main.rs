//! routegated — request gating in front of an application.
//!
//! Loads `gate.toml`, assembles the health monitor and decision
//! engine, and serves the gate as axum middleware. Configuration
//! problems abort startup; nothing else ever surfaces an error to a
//! client — bad sessions read as anonymous and probe failures read as
//! an unhealthy upstream.
//!
//! # Usage
//!
//! ```text
//! routegated --config gate.toml --port 8080
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use routegate_core::GateConfig;
use routegate_engine::{GateEngine, RouteTable};
use routegate_health::HealthMonitor;
use routegated::{build_router, GateState};

#[derive(Parser)]
#[command(name = "routegated", about = "Routegate daemon")]
struct Cli {
    /// Path to the gate configuration file.
    #[arg(long, default_value = "gate.toml")]
    config: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,routegated=debug,routegate=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // The only fatal error class: bad or missing configuration.
    let config = GateConfig::from_file(&cli.config)?;
    info!(path = ?cli.config, health_url = config.health_url(), "config loaded");

    let monitor = Arc::new(HealthMonitor::from_config(&config)?);
    info!(
        timeout = %config.upstream.health_timeout,
        ttl = %config.upstream.health_cache_ttl,
        "health monitor initialized"
    );

    let engine = Arc::new(GateEngine::new(RouteTable::from_config(&config.routes)));
    info!("decision engine initialized");

    let state = GateState {
        engine,
        monitor,
        cookie: config.session.cookie.clone(),
    };
    let router = build_router(state, placeholder_app());

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "routegated listening");
    axum::serve(listener, router).await?;

    Ok(())
}

/// Stand-in application router. The gated pages are opaque route
/// targets; in a real deployment the inner router is the application.
fn placeholder_app() -> axum::Router {
    axum::Router::new().fallback(|| async { "ok" })
}
