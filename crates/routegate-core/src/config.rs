//! gate.toml configuration parser.
//!
//! Everything except `upstream.health_url` has a default, so a minimal
//! config is just the health URL. Validation happens once at startup
//! and is the only place the gate is allowed to fail hard.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Environment override for the upstream health URL.
pub const HEALTH_URL_ENV: &str = "ROUTEGATE_HEALTH_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GateConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamConfig {
    /// Full URL of the upstream health endpoint. Required.
    pub health_url: Option<String>,
    /// Probe timeout (e.g., "5s").
    #[serde(default = "default_health_timeout")]
    pub health_timeout: String,
    /// How long a probe result stays fresh (e.g., "10s").
    #[serde(default = "default_health_cache_ttl")]
    pub health_cache_ttl: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Login/register paths (exact match). The first entry is the
    /// redirect target for unauthenticated users.
    #[serde(default = "default_public_auth")]
    pub public_auth: Vec<String>,
    #[serde(default = "default_maintenance")]
    pub maintenance: String,
    #[serde(default = "default_onboarding")]
    pub onboarding: String,
    /// Protected path prefixes.
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,
    #[serde(default = "default_home")]
    pub home: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session blob.
    #[serde(default = "default_cookie")]
    pub cookie: String,
}

fn default_health_timeout() -> String {
    "5s".to_string()
}

fn default_health_cache_ttl() -> String {
    "10s".to_string()
}

fn default_public_auth() -> Vec<String> {
    vec!["/login".to_string(), "/register".to_string()]
}

fn default_maintenance() -> String {
    "/maintenance".to_string()
}

fn default_onboarding() -> String {
    "/onboarding".to_string()
}

fn default_protected() -> Vec<String> {
    vec!["/dashboard".to_string()]
}

fn default_home() -> String {
    "/".to_string()
}

fn default_cookie() -> String {
    "gate-session".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_auth: default_public_auth(),
            maintenance: default_maintenance(),
            onboarding: default_onboarding(),
            protected: default_protected(),
            home: default_home(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie: default_cookie(),
        }
    }
}

impl GateConfig {
    /// Load, apply the environment override, and validate.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse from a TOML string, apply the environment override, and validate.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let mut config: GateConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Ok(url) = std::env::var(HEALTH_URL_ENV) {
            config.upstream.health_url = Some(url);
        }
        config.validate()?;
        Ok(config)
    }

    /// The validated health URL.
    pub fn health_url(&self) -> &str {
        self.upstream
            .health_url
            .as_deref()
            .unwrap_or_default()
    }

    pub fn health_timeout(&self) -> ConfigResult<Duration> {
        parse_duration(&self.upstream.health_timeout).ok_or_else(|| ConfigError::BadDuration {
            field: "upstream.health_timeout".to_string(),
            value: self.upstream.health_timeout.clone(),
        })
    }

    pub fn health_cache_ttl(&self) -> ConfigResult<Duration> {
        parse_duration(&self.upstream.health_cache_ttl).ok_or_else(|| ConfigError::BadDuration {
            field: "upstream.health_cache_ttl".to_string(),
            value: self.upstream.health_cache_ttl.clone(),
        })
    }

    /// Validate the config. Called by the loaders; public so tests and
    /// hand-built configs can run the same checks.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self
            .upstream
            .health_url
            .as_deref()
            .ok_or(ConfigError::MissingHealthUrl)?;

        let uri: http::Uri = url
            .parse()
            .map_err(|_| ConfigError::InvalidHealthUrl(url.to_string()))?;
        if uri.scheme_str() != Some("http") || uri.authority().is_none() {
            return Err(ConfigError::InvalidHealthUrl(url.to_string()));
        }

        if self.routes.public_auth.is_empty() {
            return Err(ConfigError::EmptyRouteSet("public_auth".to_string()));
        }
        if self.routes.protected.is_empty() {
            return Err(ConfigError::EmptyRouteSet("protected".to_string()));
        }

        let singles = [
            &self.routes.maintenance,
            &self.routes.onboarding,
            &self.routes.home,
        ];
        for path in self
            .routes
            .public_auth
            .iter()
            .chain(self.routes.protected.iter())
            .chain(singles)
        {
            if !path.starts_with('/') {
                return Err(ConfigError::RelativePath(path.clone()));
            }
        }

        self.health_timeout()?;
        self.health_cache_ttl()?;
        Ok(())
    }
}

/// Parse a duration string like "5s", "500ms", "1m".
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
