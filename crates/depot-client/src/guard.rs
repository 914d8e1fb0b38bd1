//! The UI guard state machine.

use depot_core::models::module::Module;
use depot_core::models::permission::Action;
use uuid::Uuid;

use crate::snapshot::PermissionSnapshot;

/// Lifecycle of a permission query from the UI's perspective.
///
/// `Loading` until a snapshot (or a fetch failure) arrives; `Granted`
/// and `Denied` are terminal until a new identity resets the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Denied,
    Granted,
}

/// What the shell should render for a gated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the gated children.
    Render,
    /// Render the caller-supplied fallback (or a default "access
    /// denied" affordance).
    Fallback,
    /// Render nothing yet — the snapshot is still loading.
    Hidden,
}

/// Session-lifetime permission guard owned by the client application
/// shell.
///
/// Holds at most one snapshot, tied to one identity. Fetch failures
/// fail closed. This guard only shapes the UI; the server re-checks
/// every operation regardless.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    identity_id: Uuid,
    snapshot: Option<PermissionSnapshot>,
    fetch_failed: bool,
}

impl SessionGuard {
    /// A fresh guard for `identity_id`, in the loading state.
    pub fn new(identity_id: Uuid) -> Self {
        Self {
            identity_id,
            snapshot: None,
            fetch_failed: false,
        }
    }

    /// Install a fetched snapshot. A snapshot fetched for a different
    /// identity is ignored — it belongs to a stale session.
    pub fn apply_snapshot(&mut self, snapshot: PermissionSnapshot) {
        if snapshot.identity_id != self.identity_id {
            return;
        }
        self.snapshot = Some(snapshot);
        self.fetch_failed = false;
    }

    /// The snapshot fetch failed: fail closed until a retry succeeds
    /// or the identity changes.
    pub fn mark_fetch_failed(&mut self) {
        self.snapshot = None;
        self.fetch_failed = true;
    }

    /// A new identity logged in: drop everything and return to
    /// loading.
    pub fn reset_for_identity(&mut self, identity_id: Uuid) {
        self.identity_id = identity_id;
        self.snapshot = None;
        self.fetch_failed = false;
    }

    /// Current state for one (module, action) query.
    pub fn state(&self, module: Module, action: Action) -> GuardState {
        match (&self.snapshot, self.fetch_failed) {
            (Some(snapshot), _) => {
                if snapshot.allows(module, action) {
                    GuardState::Granted
                } else {
                    GuardState::Denied
                }
            }
            (None, true) => GuardState::Denied,
            (None, false) => GuardState::Loading,
        }
    }

    /// Render decision for one gated element.
    pub fn decide(&self, module: Module, action: Action) -> GuardDecision {
        match self.state(module, action) {
            GuardState::Granted => GuardDecision::Render,
            GuardState::Denied => GuardDecision::Fallback,
            GuardState::Loading => GuardDecision::Hidden,
        }
    }
}
