//! Administrative endpoints: permission matrix and department
//! registry management. All handlers take [`RequireAdmin`], so
//! non-admin callers are rejected before any repository access.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use depot_core::models::audit::{AuditOutcome, CreateAuditEvent};
use depot_core::models::department::{CreateDepartment, Department, UpdateDepartment};
use depot_core::models::module::Module;
use depot_core::models::permission::{PermissionRecord, UpsertPermission};
use depot_core::repository::{
    AuditLogRepository, DepartmentRepository, Pagination, PermissionRepository,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::guard::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub department: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination {
            offset: self.offset.unwrap_or(default.offset),
            limit: self.limit.unwrap_or(default.limit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

fn audit_actor(identity_id: Uuid, action: &str, module: Option<Module>, target: String) -> CreateAuditEvent {
    CreateAuditEvent {
        actor_id: identity_id,
        action: action.into(),
        module,
        target: Some(target),
        outcome: AuditOutcome::Success,
        metadata: None,
    }
}

// ---------------------------------------------------------------------------
// Permission matrix
// ---------------------------------------------------------------------------

/// `GET /admin/permissions[?department=]` — active records, paginated.
pub async fn list_permissions<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<PermissionRecord>>, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let page = state
        .permissions
        .list_permissions(params.department.as_deref(), params.pagination())
        .await?;

    Ok(Json(Page {
        items: page.items,
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpsertPermissionBody {
    pub department: String,
    pub module: Module,
    #[serde(rename = "canRead")]
    pub can_read: bool,
    #[serde(rename = "canWrite")]
    pub can_write: bool,
    #[serde(rename = "canDelete")]
    pub can_delete: bool,
}

/// `PUT /admin/permissions` — idempotent upsert keyed on
/// (department, module).
pub async fn upsert_permission<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<UpsertPermissionBody>,
) -> Result<Json<PermissionRecord>, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let record = state
        .permissions
        .set_permission(UpsertPermission {
            department: body.department.clone(),
            module: body.module,
            can_read: body.can_read,
            can_write: body.can_write,
            can_delete: body.can_delete,
            created_by: admin.id,
        })
        .await?;

    state.audit.record(audit_actor(
        admin.id,
        "permission.upsert",
        Some(body.module),
        format!("{}/{}", body.department, body.module),
    ));

    Ok(Json(record))
}

/// `DELETE /admin/permissions/{department}/{module}` — soft delete.
pub async fn deactivate_permission<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(admin): RequireAdmin,
    Path((department, module)): Path<(String, String)>,
) -> Result<StatusCode, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let module: Module = module.parse().map_err(ApiError::from)?;

    state
        .permissions
        .deactivate_permission(&department, module)
        .await?;

    state.audit.record(audit_actor(
        admin.id,
        "permission.deactivate",
        Some(module),
        format!("{department}/{module}"),
    ));

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Department registry
// ---------------------------------------------------------------------------

/// `GET /admin/departments` — active departments, paginated.
pub async fn list_departments<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Department>>, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let page = state.departments.list_active(params.pagination()).await?;

    Ok(Json(Page {
        items: page.items,
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}

/// `POST /admin/departments`
pub async fn create_department<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<CreateDepartment>,
) -> Result<(StatusCode, Json<Department>), ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    if body.slug.trim().is_empty() || body.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "department slug and name must not be empty".into(),
        ));
    }

    let slug = body.slug.clone();
    let department = state.departments.create(body).await?;

    state
        .audit
        .record(audit_actor(admin.id, "department.create", None, slug));

    Ok((StatusCode::CREATED, Json(department)))
}

/// `PATCH /admin/departments/{slug}` — display name only; the slug is
/// the stable key.
pub async fn update_department<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
    Json(body): Json<UpdateDepartment>,
) -> Result<Json<Department>, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let department = state.departments.update(&slug, body).await?;

    state
        .audit
        .record(audit_actor(admin.id, "department.update", None, slug));

    Ok(Json(department))
}

/// `DELETE /admin/departments/{slug}` — soft delete.
pub async fn deactivate_department<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    state.departments.deactivate(&slug).await?;

    state
        .audit
        .record(audit_actor(admin.id, "department.deactivate", None, slug));

    Ok(StatusCode::NO_CONTENT)
}
