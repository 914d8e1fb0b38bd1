//! Department registry domain model.
//!
//! The slug is the canonical department key — it is what identity
//! tokens and permission records carry. The display name is derived
//! from the registry and may be edited freely without touching the
//! matrix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Stable, human-readable key (e.g. `marketing`). Unique.
    pub slug: String,
    /// Display name (e.g. `Marketing`).
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDepartment {
    pub name: Option<String>,
}
