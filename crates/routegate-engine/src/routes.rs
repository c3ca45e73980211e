//! Route classification — maps request paths to their gating class.
//!
//! The table is built once from config and then only read. Exact
//! matches (maintenance, auth pages, home) win over the protected
//! prefix set, so listing `/onboarding` under `protected` cannot
//! reclassify it.

use routegate_core::config::RouteConfig;
use routegate_core::RouteClass;

/// Owns the configured path sets and resolves redirect targets.
#[derive(Debug, Clone)]
pub struct RouteTable {
    public_auth: Vec<String>,
    maintenance: String,
    onboarding: String,
    protected: Vec<String>,
    home: String,
}

impl RouteTable {
    /// Build from a validated route config.
    pub fn from_config(routes: &RouteConfig) -> Self {
        Self {
            public_auth: routes.public_auth.clone(),
            maintenance: routes.maintenance.clone(),
            onboarding: routes.onboarding.clone(),
            protected: routes.protected.clone(),
            home: routes.home.clone(),
        }
    }

    /// Classify a request path. Pure; the class never changes over a
    /// request's lifetime.
    pub fn classify(&self, path: &str) -> RouteClass {
        if path == self.maintenance {
            RouteClass::Maintenance
        } else if self.public_auth.iter().any(|p| p == path) {
            RouteClass::PublicAuth
        } else if prefix_match(path, &self.onboarding) {
            RouteClass::Onboarding
        } else if self.protected.iter().any(|p| prefix_match(path, p)) {
            RouteClass::Protected
        } else if path == self.home {
            RouteClass::Home
        } else {
            RouteClass::Other
        }
    }

    /// Where unauthenticated users are sent (first public-auth path).
    pub fn auth_target(&self) -> &str {
        &self.public_auth[0]
    }

    pub fn maintenance_target(&self) -> &str {
        &self.maintenance
    }

    pub fn onboarding_target(&self) -> &str {
        &self.onboarding
    }

    /// Where authenticated users land (first protected path).
    pub fn protected_target(&self) -> &str {
        &self.protected[0]
    }

    pub fn home_target(&self) -> &str {
        &self.home
    }
}

/// Segment-aware prefix match: `/dashboard` matches `/dashboard` and
/// `/dashboard/settings` but not `/dashboardx`.
fn prefix_match(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::from_config(&RouteConfig::default())
    }

    #[test]
    fn classifies_default_routes() {
        let t = table();
        assert_eq!(t.classify("/login"), RouteClass::PublicAuth);
        assert_eq!(t.classify("/register"), RouteClass::PublicAuth);
        assert_eq!(t.classify("/maintenance"), RouteClass::Maintenance);
        assert_eq!(t.classify("/onboarding"), RouteClass::Onboarding);
        assert_eq!(t.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(t.classify("/"), RouteClass::Home);
        assert_eq!(t.classify("/other-page"), RouteClass::Other);
    }

    #[test]
    fn protected_is_prefix_matched_by_segment() {
        let t = table();
        assert_eq!(t.classify("/dashboard/settings"), RouteClass::Protected);
        assert_eq!(t.classify("/dashboard/a/b"), RouteClass::Protected);
        assert_eq!(t.classify("/dashboardx"), RouteClass::Other);
    }

    #[test]
    fn exact_classes_win_over_protected_prefixes() {
        let config = RouteConfig {
            protected: vec!["/dashboard".to_string(), "/onboarding".to_string()],
            ..RouteConfig::default()
        };
        let t = RouteTable::from_config(&config);
        assert_eq!(t.classify("/onboarding"), RouteClass::Onboarding);
    }

    #[test]
    fn redirect_targets_resolve() {
        let t = table();
        assert_eq!(t.auth_target(), "/login");
        assert_eq!(t.maintenance_target(), "/maintenance");
        assert_eq!(t.onboarding_target(), "/onboarding");
        assert_eq!(t.protected_target(), "/dashboard");
        assert_eq!(t.home_target(), "/");
    }
}
