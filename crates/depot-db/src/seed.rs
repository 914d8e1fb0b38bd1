//! Idempotent seeding of default departments.
//!
//! Seeding is the only path that creates records implicitly; the
//! permission matrix itself is only ever written through the admin
//! surface.

use depot_core::models::department::CreateDepartment;
use depot_core::repository::DepartmentRepository;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;
use crate::repository::SurrealDepartmentRepository;

/// Create each department unless one with the same slug already
/// exists. Safe to run on every startup.
pub async fn seed_departments<C: Connection>(
    db: &Surreal<C>,
    departments: &[(&str, &str)],
) -> Result<(), DbError> {
    let repo = SurrealDepartmentRepository::new(db.clone());

    for (slug, name) in departments {
        match repo
            .create(CreateDepartment {
                slug: (*slug).into(),
                name: (*name).into(),
            })
            .await
        {
            Ok(_) => info!(slug, "Seeded department"),
            Err(depot_core::DepotError::AlreadyExists { .. }) => {}
            Err(e) => return Err(DbError::Migration(format!("seeding {slug}: {e}"))),
        }
    }

    Ok(())
}
