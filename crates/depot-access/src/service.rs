//! Permission resolution and the administrative matrix surface.

use std::collections::BTreeMap;

use depot_core::error::{DepotError, DepotResult};
use depot_core::models::identity::Role;
use depot_core::models::module::Module;
use depot_core::models::permission::{EffectivePermission, PermissionRecord, UpsertPermission};
use depot_core::policy;
use depot_core::repository::{PaginatedResult, Pagination, PermissionRepository};
use tracing::warn;

/// The permission resolver.
///
/// Resolution never fails: a degraded matrix store degrades to
/// [`policy::READ_ONLY_FALLBACK`] instead of erroring, so viewing
/// stays available when the permission store is not. The
/// administrative surface (`set_permission` and friends) does
/// propagate errors — admins need to know their write failed.
pub struct PermissionService<P> {
    matrix: P,
}

impl<P: PermissionRepository> PermissionService<P> {
    pub fn new(matrix: P) -> Self {
        Self { matrix }
    }

    /// Effective permission for (department, role, module).
    ///
    /// Admins and department-less users never hit the store; see
    /// [`policy::resolve`] for the rule ordering.
    pub async fn effective(
        &self,
        department: Option<&str>,
        role: Role,
        module: Module,
    ) -> EffectivePermission {
        let record = match department {
            Some(dept) if !dept.is_empty() && role != Role::Admin => {
                match self.matrix.find_active(dept, module).await {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(
                            department = dept,
                            module = %module,
                            error = %e,
                            "permission lookup failed, degrading to read-only"
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        policy::resolve(role, department, record.as_ref())
    }

    /// The full module → permission map for one identity, one entry
    /// per [`Module::ALL`].
    ///
    /// This is what the client snapshot endpoint serves. A single
    /// department-scoped query fills in the explicit grants; every
    /// other module gets the fallback.
    pub async fn effective_matrix(
        &self,
        department: Option<&str>,
        role: Role,
    ) -> BTreeMap<Module, EffectivePermission> {
        if role == Role::Admin {
            return Module::ALL
                .into_iter()
                .map(|m| (m, policy::FULL_ACCESS))
                .collect();
        }

        let mut matrix: BTreeMap<Module, EffectivePermission> = Module::ALL
            .into_iter()
            .map(|m| (m, policy::READ_ONLY_FALLBACK))
            .collect();

        let Some(dept) = department.filter(|d| !d.is_empty()) else {
            return matrix;
        };

        match self.matrix.list_active_for_department(dept).await {
            Ok(records) => {
                for record in records {
                    matrix.insert(record.module, record.grant());
                }
            }
            Err(e) => {
                warn!(
                    department = dept,
                    error = %e,
                    "matrix lookup failed, degrading to read-only"
                );
            }
        }

        matrix
    }

    /// Administrative upsert, keyed on (department, module).
    /// Idempotent; last writer wins.
    ///
    /// Role enforcement is the guard layer's job — this method only
    /// validates the input shape.
    pub async fn set_permission(&self, input: UpsertPermission) -> DepotResult<PermissionRecord> {
        if input.department.trim().is_empty() {
            return Err(DepotError::Validation {
                message: "department must not be empty".into(),
            });
        }

        self.matrix.upsert(input).await
    }

    /// Soft-delete the active record for (department, module).
    pub async fn deactivate_permission(
        &self,
        department: &str,
        module: Module,
    ) -> DepotResult<()> {
        if department.trim().is_empty() {
            return Err(DepotError::Validation {
                message: "department must not be empty".into(),
            });
        }

        self.matrix.deactivate(department, module).await
    }

    /// Active records, optionally filtered by department.
    pub async fn list_permissions(
        &self,
        department: Option<&str>,
        pagination: Pagination,
    ) -> DepotResult<PaginatedResult<PermissionRecord>> {
        self.matrix.list_active(department, pagination).await
    }
}
