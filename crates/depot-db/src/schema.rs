//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

pub(crate) const SCHEMA_V1: &str = "\
-- =======================================================================
-- Departments (slug is the canonical key; display name is derived)
-- =======================================================================
DEFINE TABLE department SCHEMAFULL;
DEFINE FIELD slug ON TABLE department TYPE string;
DEFINE FIELD name ON TABLE department TYPE string;
DEFINE FIELD is_active ON TABLE department TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE department TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE department TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_department_slug ON TABLE department \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Permission matrix (one row per department x module pair; soft
-- deletion flips is_active on that row)
-- =======================================================================
DEFINE TABLE permission_record SCHEMAFULL;
DEFINE FIELD department ON TABLE permission_record TYPE string;
DEFINE FIELD module ON TABLE permission_record TYPE string \
    ASSERT $value IN ['ASSETS', 'DOCUMENTS', 'DIGITAL_ASSETS', \
    'USERS', 'CATEGORIES', 'WATERMARKS', 'AUDIT_LOGS', 'REPORTS', \
    'SETTINGS', 'AI_CHAT'];
DEFINE FIELD can_read ON TABLE permission_record TYPE bool;
DEFINE FIELD can_write ON TABLE permission_record TYPE bool;
DEFINE FIELD can_delete ON TABLE permission_record TYPE bool;
DEFINE FIELD is_active ON TABLE permission_record TYPE bool \
    DEFAULT true;
DEFINE FIELD created_by ON TABLE permission_record TYPE string;
DEFINE FIELD created_at ON TABLE permission_record TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE permission_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_permission_dept_module ON TABLE permission_record \
    COLUMNS department, module UNIQUE;

-- =======================================================================
-- Audit log (append-only)
-- =======================================================================
DEFINE TABLE audit_log SCHEMAFULL;
DEFINE FIELD actor_id ON TABLE audit_log TYPE string;
DEFINE FIELD action ON TABLE audit_log TYPE string;
DEFINE FIELD module ON TABLE audit_log TYPE option<string>;
DEFINE FIELD target ON TABLE audit_log TYPE option<string>;
DEFINE FIELD outcome ON TABLE audit_log TYPE string \
    ASSERT $value IN ['SUCCESS', 'DENIED', 'FAILURE'];
DEFINE FIELD metadata ON TABLE audit_log TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD timestamp ON TABLE audit_log TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

/// Run all pending migrations. Idempotent — applied versions are
/// recorded in the `_migration` table and skipped on the next run.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("migration table DDL: {e}")))?;

    let mut result = db
        .query("SELECT version, name FROM _migration ORDER BY version ASC")
        .await?;
    let applied: Vec<MigrationRecord> = result.take(0)?;
    let latest = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= latest {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        db.query(migration.sql)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("{}: {e}", migration.name)))?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("recording {}: {e}", migration.name)))?;
    }

    Ok(())
}
