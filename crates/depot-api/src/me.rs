//! Self-service permission read endpoints — what the client shell
//! fetches for its session snapshot.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use depot_core::models::module::Module;
use depot_core::models::permission::EffectivePermission;
use depot_core::repository::{AuditLogRepository, DepartmentRepository, PermissionRepository};

use crate::error::ApiError;
use crate::guard::CurrentUser;
use crate::state::AppState;

/// `GET /permissions/me` — the caller's full module → permission map.
pub async fn matrix<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    CurrentUser(identity): CurrentUser,
) -> Json<BTreeMap<Module, EffectivePermission>>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let matrix = state
        .permissions
        .effective_matrix(identity.department.as_deref(), identity.role)
        .await;
    Json(matrix)
}

/// `GET /permissions/me/{module}` — one module's triple.
pub async fn module_permission<P, D, A>(
    State(state): State<AppState<P, D, A>>,
    CurrentUser(identity): CurrentUser,
    Path(module): Path<String>,
) -> Result<Json<EffectivePermission>, ApiError>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    let module: Module = module.parse().map_err(ApiError::from)?;

    let effective = state
        .permissions
        .effective(identity.department.as_deref(), identity.role, module)
        .await;
    Ok(Json(effective))
}
