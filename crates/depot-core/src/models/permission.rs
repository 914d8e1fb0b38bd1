//! Permission matrix domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::module::Module;

/// One of the three gated operation classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Read,
    Write,
    Delete,
}

/// The resolved permission triple for one (identity, module) pairing.
///
/// Never persisted — recomputed per request from the matrix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectivePermission {
    #[serde(rename = "canRead")]
    pub can_read: bool,
    #[serde(rename = "canWrite")]
    pub can_write: bool,
    #[serde(rename = "canDelete")]
    pub can_delete: bool,
}

impl EffectivePermission {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.can_read,
            Action::Write => self.can_write,
            Action::Delete => self.can_delete,
        }
    }
}

/// One row of the department × module matrix.
///
/// Keyed by (department, module) — at most one row exists per pair.
/// Soft deletion flips `is_active` on the row; the row itself stays
/// for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Department slug (canonical department key).
    pub department: String,
    pub module: Module,
    pub can_read: bool,
    pub can_write: bool,
    pub can_delete: bool,
    pub is_active: bool,
    /// The admin who created or last touched this record.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PermissionRecord {
    pub fn grant(&self) -> EffectivePermission {
        EffectivePermission {
            can_read: self.can_read,
            can_write: self.can_write,
            can_delete: self.can_delete,
        }
    }
}

/// Input for the administrative upsert. Keyed on (department, module):
/// applying it twice leaves one active record reflecting the last call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertPermission {
    pub department: String,
    pub module: Module,
    pub can_read: bool,
    pub can_write: bool,
    pub can_delete: bool,
    /// Acting admin.
    pub created_by: Uuid,
}
