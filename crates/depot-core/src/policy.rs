//! The permission resolution policy.
//!
//! Pure decision logic — no storage access. Callers look up the
//! matching active [`PermissionRecord`] (or fail to) and hand whatever
//! they found to [`resolve`].

use crate::models::identity::Role;
use crate::models::permission::{EffectivePermission, PermissionRecord};

/// The grant every admin receives, unconditionally.
pub const FULL_ACCESS: EffectivePermission = EffectivePermission {
    can_read: true,
    can_write: true,
    can_delete: true,
};

/// The fail-open default: view access, no mutation.
///
/// Applied when the caller has no department, when no active record
/// exists for (department, module), and when the permission store is
/// degraded. Absence of an explicit grant is read-only, not
/// zero-access — a deliberate product policy, changeable here and
/// nowhere else.
pub const READ_ONLY_FALLBACK: EffectivePermission = EffectivePermission {
    can_read: true,
    can_write: false,
    can_delete: false,
};

/// Resolve the effective permission for (role, department, module).
///
/// `record` is the single active matrix row for (department, module),
/// if one exists. Rules apply in priority order, first match wins:
///
/// 1. Admin override — full access, the matrix is not consulted.
/// 2. No department — read-only fallback (a user mid-provisioning can
///    still see the app).
/// 3. Active record found — its triple, verbatim.
/// 4. No record — read-only fallback.
pub fn resolve(
    role: Role,
    department: Option<&str>,
    record: Option<&PermissionRecord>,
) -> EffectivePermission {
    if role == Role::Admin {
        return FULL_ACCESS;
    }

    match department {
        None | Some("") => READ_ONLY_FALLBACK,
        Some(_) => match record {
            Some(r) => r.grant(),
            None => READ_ONLY_FALLBACK,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::module::Module;

    fn record(can_read: bool, can_write: bool, can_delete: bool) -> PermissionRecord {
        PermissionRecord {
            department: "marketing".into(),
            module: Module::DigitalAssets,
            can_read,
            can_write,
            can_delete,
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_overrides_everything() {
        let restrictive = record(false, false, false);
        assert_eq!(
            resolve(Role::Admin, Some("marketing"), Some(&restrictive)),
            FULL_ACCESS
        );
        assert_eq!(resolve(Role::Admin, None, None), FULL_ACCESS);
    }

    #[test]
    fn no_department_gets_read_only() {
        assert_eq!(resolve(Role::User, None, None), READ_ONLY_FALLBACK);
        assert_eq!(resolve(Role::Viewer, None, None), READ_ONLY_FALLBACK);
    }

    #[test]
    fn empty_department_treated_as_none() {
        assert_eq!(resolve(Role::User, Some(""), None), READ_ONLY_FALLBACK);
    }

    #[test]
    fn record_applies_verbatim() {
        let r = record(true, true, false);
        let effective = resolve(Role::User, Some("marketing"), Some(&r));
        assert!(effective.can_read);
        assert!(effective.can_write);
        assert!(!effective.can_delete);

        // Including fully-denying records: the fallback does not kick in
        // when an explicit grant exists.
        let deny = record(false, false, false);
        let effective = resolve(Role::User, Some("marketing"), Some(&deny));
        assert!(!effective.can_read);
    }

    #[test]
    fn missing_record_gets_read_only() {
        assert_eq!(
            resolve(Role::User, Some("it"), None),
            READ_ONLY_FALLBACK
        );
    }
}
