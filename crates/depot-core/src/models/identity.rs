//! Verified request identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse application role carried by every identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Viewer => "VIEWER",
        }
    }
}

/// A verified identity, produced by the auth layer once per request.
///
/// `department` holds a department slug (the canonical department
/// key); `None` means the user has not been assigned to a department
/// yet. Role and department reflect token-issuance time — the token
/// lifetime bounds how stale they can get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
