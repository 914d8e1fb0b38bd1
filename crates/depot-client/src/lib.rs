//! DEPOT Client — the advisory UI guard.
//!
//! A client shell fetches the caller's permission matrix once per
//! session (`GET /permissions/me`), hands it to a [`SessionGuard`],
//! and asks the guard what to render. The guard is advisory only: it
//! hides unavailable actions for UX, while the server-side guard
//! remains the authoritative enforcement point.

pub mod guard;
pub mod snapshot;

pub use guard::{GuardDecision, GuardState, SessionGuard};
pub use snapshot::PermissionSnapshot;
