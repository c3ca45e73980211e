//! Domain types for request gating.
//!
//! These types carry no mutable state: claims are derived fresh per
//! request, route classes are a pure function of the path, and a
//! decision is just data — the HTTP layer turns it into a response.

use serde::Deserialize;

// ── Session ────────────────────────────────────────────────────────

/// Role carried by a session. Unknown or absent roles map to `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(other)]
    #[default]
    Standard,
}

/// Claims derived from the client-supplied session blob.
///
/// Client-controlled data: these claims drive UI routing only and are
/// never an authorization boundary. The backend re-checks authorization
/// on every real request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    /// True only if the blob parsed and carried a non-empty subject
    /// and credential.
    pub authenticated: bool,
    pub role: Role,
    pub profile_completed: bool,
}

impl SessionClaims {
    /// The claims of a request with no usable session.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            role: Role::Standard,
            profile_completed: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ── Routing ────────────────────────────────────────────────────────

/// Static classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login/register pages.
    PublicAuth,
    /// The maintenance page.
    Maintenance,
    /// The onboarding flow (gated like `Protected` for guests).
    Onboarding,
    /// Dashboard and similar authenticated areas (prefix-matched).
    Protected,
    /// The home page.
    Home,
    /// Anything else; never gated.
    Other,
}

/// The engine's verdict for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request continue to the application.
    Allow,
    /// Send the client to the given absolute path instead.
    Redirect(String),
}

impl Decision {
    pub fn redirect(target: impl Into<String>) -> Self {
        Decision::Redirect(target.into())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}
