//! The session-scoped permission snapshot.

use std::collections::BTreeMap;

use depot_core::models::module::Module;
use depot_core::models::permission::{Action, EffectivePermission};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One identity's module → permission map.
///
/// `GET /permissions/me` returns the bare matrix; the application
/// shell wraps it here together with the identity of the session it
/// was fetched for. The snapshot is owned by the shell for the
/// lifetime of that session, never a process-global cache, and the
/// identity tag stops a login as someone else from reusing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// The identity this snapshot was fetched for.
    pub identity_id: Uuid,
    pub matrix: BTreeMap<Module, EffectivePermission>,
}

impl PermissionSnapshot {
    pub fn new(identity_id: Uuid, matrix: BTreeMap<Module, EffectivePermission>) -> Self {
        Self {
            identity_id,
            matrix,
        }
    }

    /// Whether this snapshot grants `action` on `module`.
    ///
    /// A module absent from the snapshot is treated as denied — the
    /// server always sends the full matrix, so absence means the
    /// snapshot predates the module and must not be trusted.
    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.matrix
            .get(&module)
            .map(|p| p.allows(action))
            .unwrap_or(false)
    }
}
