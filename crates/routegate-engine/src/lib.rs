//! routegate-engine — the routing decision engine.
//!
//! A pure function from `(path, session blob, upstream health)` to a
//! [`Decision`](routegate_core::Decision): allow the request or
//! redirect it. The engine holds no per-request state and produces no
//! side effects; the HTTP layer emits the actual response.
//!
//! # Rule order
//!
//! Decisions come from an ordered rule list; the first rule that
//! speaks wins. Health dominates auth, and route class dominates
//! role/profile checks:
//!
//! | # | rule | fires when |
//! |---|---|---|
//! | 1 | health-gate | upstream unhealthy |
//! | 2 | maintenance-exit | healthy request for the maintenance page |
//! | 3 | guest-gate | session is unauthenticated |
//! | 4 | auth-entry | authenticated user on login/register/home |
//! | 5 | onboarding-gate | authenticated user on the onboarding flow |
//! | 6 | protected-gate | authenticated user on a protected path |
//! | 7 | pass-through | everything else |
//!
//! # Not a security boundary
//!
//! The session blob is client-controlled. These decisions are a UX
//! convenience (send people to the page that makes sense for them);
//! authorization for protected resources happens server-side on the
//! real request, never here.

pub mod decision;
pub mod routes;
pub mod session;

pub use decision::GateEngine;
pub use routes::RouteTable;
pub use session::parse_claims;
