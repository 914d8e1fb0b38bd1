//! JSON REST API for the DEPOT permission core.
//!
//! Exposes an axum [`Router`] backed by any set of `depot-core`
//! repository implementations. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", depot_api::api_router(state.clone()))
//! ```

pub mod admin;
pub mod error;
pub mod guard;
pub mod me;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, patch},
};
use depot_core::repository::{AuditLogRepository, DepartmentRepository, PermissionRepository};

pub use error::ApiError;
pub use guard::{CurrentUser, RequireAdmin};
pub use state::AppState;

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<P, D, A>(state: AppState<P, D, A>) -> Router<()>
where
    P: PermissionRepository + 'static,
    D: DepartmentRepository + 'static,
    A: AuditLogRepository + Clone + 'static,
{
    Router::new()
        // Self-service snapshot
        .route("/permissions/me", get(me::matrix::<P, D, A>))
        .route(
            "/permissions/me/{module}",
            get(me::module_permission::<P, D, A>),
        )
        // Matrix administration
        .route(
            "/admin/permissions",
            get(admin::list_permissions::<P, D, A>).put(admin::upsert_permission::<P, D, A>),
        )
        .route(
            "/admin/permissions/{department}/{module}",
            delete(admin::deactivate_permission::<P, D, A>),
        )
        // Department registry
        .route(
            "/admin/departments",
            get(admin::list_departments::<P, D, A>).post(admin::create_department::<P, D, A>),
        )
        .route(
            "/admin/departments/{slug}",
            patch(admin::update_department::<P, D, A>)
                .delete(admin::deactivate_department::<P, D, A>),
        )
        .with_state(state)
}
