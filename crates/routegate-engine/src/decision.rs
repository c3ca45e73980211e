//! The gating decision — an ordered rule list.
//!
//! Each rule looks at `(route class, claims, health)` and either
//! stays silent or produces the final decision. Evaluation order is
//! the contract: the health gate dominates every auth rule, and the
//! route class dominates role/profile checks within auth. Reordering
//! this list changes observable behavior.

use tracing::debug;

use routegate_core::{Decision, RouteClass, SessionClaims};

use crate::routes::RouteTable;
use crate::session;

/// Inputs a rule may consult.
struct RuleCtx<'a> {
    class: RouteClass,
    claims: &'a SessionClaims,
    healthy: bool,
}

type Rule = fn(&GateEngine, &RuleCtx) -> Option<Decision>;

/// The ordered rule list. First `Some` wins.
const RULES: &[(&str, Rule)] = &[
    ("health-gate", GateEngine::health_gate),
    ("maintenance-exit", GateEngine::maintenance_exit),
    ("guest-gate", GateEngine::guest_gate),
    ("auth-entry", GateEngine::auth_entry),
    ("onboarding-gate", GateEngine::onboarding_gate),
    ("protected-gate", GateEngine::protected_gate),
    ("pass-through", GateEngine::pass_through),
];

/// The routing decision engine. Stateless between requests; the only
/// thing it owns is the route table.
#[derive(Debug, Clone)]
pub struct GateEngine {
    routes: RouteTable,
}

impl GateEngine {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide what happens to a request.
    ///
    /// Pure: identical inputs yield identical decisions, and nothing
    /// here can fail — malformed sessions degrade to anonymous.
    pub fn decide(&self, path: &str, raw_session: Option<&str>, healthy: bool) -> Decision {
        let class = self.routes.classify(path);
        let claims = session::parse_claims(raw_session);
        let ctx = RuleCtx {
            class,
            claims: &claims,
            healthy,
        };

        for &(name, rule) in RULES {
            if let Some(decision) = rule(self, &ctx) {
                debug!(rule = name, path, ?class, ?decision, "gate decision");
                return decision;
            }
        }

        // RULES ends with an unconditional rule.
        unreachable!("rule list did not produce a decision")
    }

    /// Unhealthy upstream: everything goes to maintenance, which is
    /// itself allowed. Dominates all auth logic.
    fn health_gate(&self, ctx: &RuleCtx) -> Option<Decision> {
        if ctx.healthy {
            return None;
        }
        Some(if ctx.class == RouteClass::Maintenance {
            Decision::Allow
        } else {
            Decision::redirect(self.routes.maintenance_target())
        })
    }

    /// Healthy upstream: nobody stays on the maintenance page.
    fn maintenance_exit(&self, ctx: &RuleCtx) -> Option<Decision> {
        if ctx.class == RouteClass::Maintenance {
            Some(Decision::redirect(self.routes.home_target()))
        } else {
            None
        }
    }

    /// Unauthenticated sessions: protected areas bounce to the auth
    /// page, everything else (home included) is open.
    fn guest_gate(&self, ctx: &RuleCtx) -> Option<Decision> {
        if ctx.claims.authenticated {
            return None;
        }
        Some(match ctx.class {
            RouteClass::Protected | RouteClass::Onboarding => {
                Decision::redirect(self.routes.auth_target())
            }
            _ => Decision::Allow,
        })
    }

    /// Authenticated users on the auth pages or home get forwarded to
    /// where they belong. Admin outranks the profile check.
    fn auth_entry(&self, ctx: &RuleCtx) -> Option<Decision> {
        match ctx.class {
            RouteClass::PublicAuth | RouteClass::Home => Some(if ctx.claims.is_admin() {
                Decision::redirect(self.routes.protected_target())
            } else if !ctx.claims.profile_completed {
                Decision::redirect(self.routes.onboarding_target())
            } else {
                Decision::redirect(self.routes.protected_target())
            }),
            _ => None,
        }
    }

    /// Onboarding is only for non-admins who still need it.
    fn onboarding_gate(&self, ctx: &RuleCtx) -> Option<Decision> {
        if ctx.class != RouteClass::Onboarding {
            return None;
        }
        Some(if ctx.claims.is_admin() || ctx.claims.profile_completed {
            Decision::redirect(self.routes.protected_target())
        } else {
            Decision::Allow
        })
    }

    /// Protected areas require a complete profile unless admin.
    fn protected_gate(&self, ctx: &RuleCtx) -> Option<Decision> {
        if ctx.class != RouteClass::Protected {
            return None;
        }
        Some(if !ctx.claims.profile_completed && !ctx.claims.is_admin() {
            Decision::redirect(self.routes.onboarding_target())
        } else {
            Decision::Allow
        })
    }

    fn pass_through(&self, _ctx: &RuleCtx) -> Option<Decision> {
        Some(Decision::Allow)
    }
}
