//! Health check probe logic.
//!
//! Performs a single bounded HTTP GET against the upstream health
//! endpoint. One attempt per refresh; there are no retries inside a
//! probe, and every failure mode reads as "not healthy".

use std::time::Duration;

use tracing::debug;

/// Result of a single health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The health endpoint returned 2xx.
    Healthy,
    /// The health endpoint returned non-2xx.
    Unhealthy,
    /// The probe could not be executed (connection error or timeout).
    Failed,
}

impl ProbeResult {
    /// Whether this result counts as a usable upstream.
    pub fn is_healthy(self) -> bool {
        self == ProbeResult::Healthy
    }
}

/// Perform an HTTP health probe against a full URL.
///
/// Returns `Healthy` if the response is 2xx, `Unhealthy` for non-2xx,
/// or `Failed` if the URL is unusable, the connection fails, or the
/// timeout elapses.
pub async fn http_probe(url: &str, timeout: Duration) -> ProbeResult {
    let uri: http::Uri = match url.parse() {
        Ok(u) => u,
        Err(e) => {
            debug!(error = %e, url, "health probe url unparsable");
            return ProbeResult::Failed;
        }
    };
    let Some(host) = uri.host() else {
        debug!(url, "health probe url has no host");
        return ProbeResult::Failed;
    };
    let address = format!("{host}:{}", uri.port_u16().unwrap_or(80));
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    let result = tokio::time::timeout(timeout, async {
        let stream = match tokio::net::TcpStream::connect(&address).await {
            Ok(s) => s,
            Err(e) => {
                debug!(error = %e, %address, "health probe connection failed");
                return ProbeResult::Failed;
            }
        };

        let io = hyper_util::rt::TokioIo::new(stream);
        let (mut sender, conn) = match hyper::client::conn::http1::handshake(io).await {
            Ok(pair) => pair,
            Err(e) => {
                debug!(error = %e, %address, "health probe handshake failed");
                return ProbeResult::Failed;
            }
        };

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = http::Request::builder()
            .method("GET")
            .uri(path)
            .header("host", address.as_str())
            .header("user-agent", "routegate-health/0.1")
            .body(http_body_util::Empty::<bytes::Bytes>::new())
            .unwrap();

        match sender.send_request(req).await {
            Ok(resp) => {
                if resp.status().is_success() {
                    ProbeResult::Healthy
                } else {
                    debug!(status = %resp.status(), %address, "health probe non-2xx");
                    ProbeResult::Unhealthy
                }
            }
            Err(e) => {
                debug!(error = %e, %address, "health probe request failed");
                ProbeResult::Failed
            }
        }
    })
    .await;

    match result {
        Ok(probe) => probe,
        Err(_) => {
            debug!(url, "health probe timed out");
            ProbeResult::Failed
        }
    }
}
