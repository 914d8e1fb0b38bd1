//! Request guards — the server-side enforcement point.
//!
//! Guards are axum extractors, so they short-circuit before the
//! handler body runs and compose in a fixed order: bearer
//! authentication ([`CurrentUser`]), then coarse role checks
//! ([`RequireAdmin`]), then fine-grained module/action checks
//! ([`AppState::authorize`]) inside the handler.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use depot_auth::verify_access_token;
use depot_core::models::identity::{Identity, Role};
use depot_core::models::module::Module;
use depot_core::models::permission::Action;
use depot_core::repository::{AuditLogRepository, DepartmentRepository, PermissionRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// Proof of authentication: a verified identity extracted from the
/// request's bearer token. Handlers that take this never run for
/// unauthenticated requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<P, D, A> FromRequestParts<AppState<P, D, A>> for CurrentUser
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P, D, A>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("missing bearer token".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthenticated("malformed authorization header".into()))?;

        let identity = verify_access_token(token, &state.auth)
            .map_err(|e| ApiError::Unauthenticated(e.to_string()))?;

        Ok(CurrentUser(identity))
    }
}

/// Proof of authentication *and* the ADMIN role. The coarse role
/// guard for administrative endpoints.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Identity);

impl<P, D, A> FromRequestParts<AppState<P, D, A>> for RequireAdmin
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P, D, A>,
    ) -> Result<Self, Self::Rejection> {
        // Authentication first — an unauthenticated request is 401,
        // never 403.
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        if identity.role != Role::Admin {
            return Err(ApiError::Forbidden("requires ADMIN role".into()));
        }

        Ok(RequireAdmin(identity))
    }
}

impl<P, D, A> AppState<P, D, A>
where
    P: PermissionRepository,
    D: DepartmentRepository,
    A: AuditLogRepository + Clone + 'static,
{
    /// Fine-grained guard: resolve the caller's effective permission
    /// for `module` and require `action`.
    pub async fn authorize(
        &self,
        identity: &Identity,
        module: Module,
        action: Action,
    ) -> Result<(), ApiError> {
        let effective = self
            .permissions
            .effective(identity.department.as_deref(), identity.role, module)
            .await;

        if effective.allows(action) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "no {action:?} access to {module}"
            )))
        }
    }
}
