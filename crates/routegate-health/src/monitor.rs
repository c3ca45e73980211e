//! Health monitor — TTL-debounced cache over the probe.
//!
//! `check()` answers from the cache while it is fresh and refreshes it
//! synchronously once it goes stale. Failed probes are cached like
//! successful ones so an outage costs one probe per TTL window, not
//! one per request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use routegate_core::{ConfigResult, GateConfig};

use crate::checker::{http_probe, ProbeResult};

type BoxFuture = Pin<Box<dyn Future<Output = ProbeResult> + Send>>;

/// Pluggable probe: production uses [`http_probe`], tests substitute
/// counting or scripted probes.
pub type ProbeFn = Arc<dyn Fn() -> BoxFuture + Send + Sync>;

/// A cached probe verdict.
#[derive(Debug, Clone, Copy)]
pub struct HealthState {
    pub is_healthy: bool,
    pub observed_at: Instant,
}

/// Debounces upstream health probes behind a TTL cache.
///
/// Shared across requests; the cache is the only shared mutable state
/// in the gate. Concurrent refreshes in the same stale window are
/// allowed and converge last-writer-wins.
pub struct HealthMonitor {
    ttl: Duration,
    probe: ProbeFn,
    cache: RwLock<Option<HealthState>>,
}

impl HealthMonitor {
    /// Monitor probing `url` with the given per-probe timeout.
    pub fn new(url: String, timeout: Duration, ttl: Duration) -> Self {
        let probe: ProbeFn = Arc::new(move || {
            let url = url.clone();
            Box::pin(async move { http_probe(&url, timeout).await })
        });
        Self::with_probe(ttl, probe)
    }

    /// Monitor for the upstream named in a validated gate config.
    pub fn from_config(config: &GateConfig) -> ConfigResult<Self> {
        Ok(Self::new(
            config.health_url().to_string(),
            config.health_timeout()?,
            config.health_cache_ttl()?,
        ))
    }

    /// Monitor with a custom probe (for tests and embedding).
    pub fn with_probe(ttl: Duration, probe: ProbeFn) -> Self {
        Self {
            ttl,
            probe,
            cache: RwLock::new(None),
        }
    }

    /// Is the upstream usable right now?
    ///
    /// Returns the cached verdict while it is younger than the TTL;
    /// otherwise runs one probe, caches the outcome (success or not),
    /// and returns it. Never blocks longer than the probe timeout.
    pub async fn check(&self) -> bool {
        if let Some(state) = *self.cache.read().await {
            if state.observed_at.elapsed() < self.ttl {
                return state.is_healthy;
            }
        }

        let result = (self.probe)().await;
        let is_healthy = result.is_healthy();
        let now = Instant::now();

        let mut cache = self.cache.write().await;
        let prev = *cache;
        // observed_at never moves backwards, even when a slower
        // concurrent refresh writes last.
        let observed_at = prev.map_or(now, |p| p.observed_at.max(now));
        *cache = Some(HealthState {
            is_healthy,
            observed_at,
        });
        drop(cache);

        match prev.map(|p| p.is_healthy) {
            Some(was) if was == is_healthy => {
                debug!(is_healthy, "health verdict refreshed");
            }
            _ if is_healthy => info!("upstream healthy"),
            _ => warn!("upstream unhealthy, gating to maintenance"),
        }

        is_healthy
    }

    /// The current cached state, if any probe has completed.
    pub async fn last_state(&self) -> Option<HealthState> {
        *self.cache.read().await
    }
}
