//! Audit log domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::module::Module;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOutcome {
    Success,
    Denied,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor_id: Uuid,
    /// Action name, e.g. `permission.upsert`.
    pub action: String,
    pub module: Option<Module>,
    /// Human-readable target key, e.g. `marketing/DIGITAL_ASSETS`.
    pub target: Option<String>,
    pub outcome: AuditOutcome,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditEvent {
    pub actor_id: Uuid,
    pub action: String,
    pub module: Option<Module>,
    pub target: Option<String>,
    pub outcome: AuditOutcome,
    pub metadata: Option<serde_json::Value>,
}
