//! Fail-open parsing of the client-supplied session blob.
//!
//! The blob is JSON from a cookie the client fully controls. Anything
//! that does not parse cleanly degrades to an anonymous session; a
//! malformed cookie must never surface an error page.

use serde::Deserialize;
use tracing::debug;

use routegate_core::{Role, SessionClaims};

/// Wire shape of the session cookie.
#[derive(Debug, Deserialize)]
struct RawSession {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    credential: String,
    #[serde(default)]
    role: Role,
    #[serde(default, alias = "profileCompleted")]
    profile_completed: bool,
}

/// Derive claims from the raw cookie value, if any.
///
/// Authenticated only when the blob parses and both subject and
/// credential are non-empty. Role and profile flags from a blob that
/// fails that bar are discarded along with it.
pub fn parse_claims(blob: Option<&str>) -> SessionClaims {
    let Some(blob) = blob else {
        return SessionClaims::anonymous();
    };

    let raw: RawSession = match serde_json::from_str(blob) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "session blob unparsable, treating as anonymous");
            return SessionClaims::anonymous();
        }
    };

    if raw.subject.is_empty() || raw.credential.is_empty() {
        return SessionClaims::anonymous();
    }

    SessionClaims {
        authenticated: true,
        role: raw.role,
        profile_completed: raw.profile_completed,
    }
}
