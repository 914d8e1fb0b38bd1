//! Functional modules — the unit of permission granularity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DepotError;

/// A named functional area of the application.
///
/// This enum is the single canonical module list: the database ASSERT
/// constraint, the HTTP wire form, and the client snapshot keys are
/// all derived from it, so server and client cannot diverge on module
/// naming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Module {
    Assets,
    Documents,
    DigitalAssets,
    Users,
    Categories,
    Watermarks,
    AuditLogs,
    Reports,
    Settings,
    AiChat,
}

impl Module {
    /// Every module, in display order. Used to materialize full
    /// permission matrices.
    pub const ALL: [Module; 10] = [
        Module::Assets,
        Module::Documents,
        Module::DigitalAssets,
        Module::Users,
        Module::Categories,
        Module::Watermarks,
        Module::AuditLogs,
        Module::Reports,
        Module::Settings,
        Module::AiChat,
    ];

    /// Canonical wire/storage form (SCREAMING_SNAKE_CASE).
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Assets => "ASSETS",
            Module::Documents => "DOCUMENTS",
            Module::DigitalAssets => "DIGITAL_ASSETS",
            Module::Users => "USERS",
            Module::Categories => "CATEGORIES",
            Module::Watermarks => "WATERMARKS",
            Module::AuditLogs => "AUDIT_LOGS",
            Module::Reports => "REPORTS",
            Module::Settings => "SETTINGS",
            Module::AiChat => "AI_CHAT",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DepotError::Validation {
                message: format!("unknown module: {s}"),
            })
    }
}
