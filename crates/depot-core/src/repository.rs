//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The permission matrix is keyed
//! by (department slug, module); the storage layer guarantees at most
//! one row per pair.

use crate::error::DepotResult;
use crate::models::{
    audit::{AuditEvent, CreateAuditEvent},
    department::{CreateDepartment, Department, UpdateDepartment},
    module::Module,
    permission::{PermissionRecord, UpsertPermission},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// The department × module permission matrix.
pub trait PermissionRepository: Send + Sync {
    /// Create or overwrite the row for (department, module) and mark
    /// it active. Last writer wins; concurrent writers never produce
    /// duplicate rows.
    fn upsert(
        &self,
        input: UpsertPermission,
    ) -> impl Future<Output = DepotResult<PermissionRecord>> + Send;

    /// The single active row for (department, module), if any.
    /// Inactive rows are invisible here.
    fn find_active(
        &self,
        department: &str,
        module: Module,
    ) -> impl Future<Output = DepotResult<Option<PermissionRecord>>> + Send;

    /// All active rows for one department (at most one per module).
    fn list_active_for_department(
        &self,
        department: &str,
    ) -> impl Future<Output = DepotResult<Vec<PermissionRecord>>> + Send;

    /// Active rows across all departments, paginated.
    fn list_active(
        &self,
        department: Option<&str>,
        pagination: Pagination,
    ) -> impl Future<Output = DepotResult<PaginatedResult<PermissionRecord>>> + Send;

    /// Soft-delete: flips `is_active` off. NotFound if no active row
    /// exists for the pair.
    fn deactivate(
        &self,
        department: &str,
        module: Module,
    ) -> impl Future<Output = DepotResult<()>> + Send;
}

/// The department registry (slug → display name).
pub trait DepartmentRepository: Send + Sync {
    /// AlreadyExists if an active department with the slug exists.
    fn create(
        &self,
        input: CreateDepartment,
    ) -> impl Future<Output = DepotResult<Department>> + Send;

    fn get_by_slug(&self, slug: &str) -> impl Future<Output = DepotResult<Department>> + Send;

    fn update(
        &self,
        slug: &str,
        input: UpdateDepartment,
    ) -> impl Future<Output = DepotResult<Department>> + Send;

    /// Soft-delete: sets `is_active` to false.
    fn deactivate(&self, slug: &str) -> impl Future<Output = DepotResult<()>> + Send;

    fn list_active(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DepotResult<PaginatedResult<Department>>> + Send;
}

/// Append-only audit trail.
pub trait AuditLogRepository: Send + Sync {
    /// Append a new audit event. No update or delete operations exist.
    fn append(
        &self,
        input: CreateAuditEvent,
    ) -> impl Future<Output = DepotResult<AuditEvent>> + Send;

    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DepotResult<PaginatedResult<AuditEvent>>> + Send;
}
