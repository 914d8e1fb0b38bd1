//! Shared application state for the API router.

use std::sync::Arc;

use depot_access::{AuditRecorder, PermissionService};
use depot_auth::AuthConfig;

/// State threaded through every handler: the permission resolver, the
/// department registry, the audit recorder, and the token
/// verification config.
pub struct AppState<P, D, A> {
    pub permissions: Arc<PermissionService<P>>,
    pub departments: Arc<D>,
    pub audit: AuditRecorder<A>,
    pub auth: Arc<AuthConfig>,
}

impl<P, D, A> AppState<P, D, A>
where
    A: Clone,
{
    pub fn new(
        permissions: PermissionService<P>,
        departments: D,
        audit: AuditRecorder<A>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            permissions: Arc::new(permissions),
            departments: Arc::new(departments),
            audit,
            auth: Arc::new(auth),
        }
    }
}

impl<P, D, A: Clone> Clone for AppState<P, D, A> {
    fn clone(&self) -> Self {
        Self {
            permissions: self.permissions.clone(),
            departments: self.departments.clone(),
            audit: self.audit.clone(),
            auth: self.auth.clone(),
        }
    }
}
