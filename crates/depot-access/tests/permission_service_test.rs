//! Integration tests for the permission resolver service, backed by
//! in-memory SurrealDB plus a deliberately failing repository for the
//! degraded-storage path.

use std::time::Duration;

use depot_access::{AuditRecorder, PermissionService};
use depot_core::error::{DepotError, DepotResult};
use depot_core::models::audit::{AuditOutcome, CreateAuditEvent};
use depot_core::models::identity::Role;
use depot_core::models::module::Module;
use depot_core::models::permission::{PermissionRecord, UpsertPermission};
use depot_core::policy;
use depot_core::repository::{
    AuditLogRepository, PaginatedResult, Pagination, PermissionRepository,
};
use depot_db::repository::{SurrealAuditLogRepository, SurrealPermissionRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> (
    PermissionService<SurrealPermissionRepository<surrealdb::engine::local::Db>>,
    Surreal<surrealdb::engine::local::Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    depot_db::run_migrations(&db).await.unwrap();
    let svc = PermissionService::new(SurrealPermissionRepository::new(db.clone()));
    (svc, db)
}

fn upsert(department: &str, module: Module, triple: (bool, bool, bool)) -> UpsertPermission {
    UpsertPermission {
        department: department.into(),
        module,
        can_read: triple.0,
        can_write: triple.1,
        can_delete: triple.2,
        created_by: Uuid::new_v4(),
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_gets_full_access_regardless_of_matrix() {
    let (svc, _db) = setup().await;

    // A restrictive record exists, but admins never consult it.
    svc.set_permission(upsert("marketing", Module::Assets, (false, false, false)))
        .await
        .unwrap();

    let effective = svc
        .effective(Some("marketing"), Role::Admin, Module::Assets)
        .await;
    assert_eq!(effective, policy::FULL_ACCESS);

    let effective = svc.effective(None, Role::Admin, Module::Settings).await;
    assert_eq!(effective, policy::FULL_ACCESS);
}

#[tokio::test]
async fn user_without_department_gets_read_only() {
    let (svc, _db) = setup().await;

    let effective = svc.effective(None, Role::User, Module::Documents).await;
    assert_eq!(effective, policy::READ_ONLY_FALLBACK);
}

#[tokio::test]
async fn user_without_record_gets_read_only() {
    let (svc, _db) = setup().await;

    let effective = svc.effective(Some("it"), Role::User, Module::Assets).await;
    assert_eq!(effective, policy::READ_ONLY_FALLBACK);
}

#[tokio::test]
async fn matching_record_applies_verbatim() {
    let (svc, _db) = setup().await;

    svc.set_permission(upsert("marketing", Module::DigitalAssets, (true, false, false)))
        .await
        .unwrap();

    let effective = svc
        .effective(Some("marketing"), Role::User, Module::DigitalAssets)
        .await;
    assert!(effective.can_read);
    assert!(!effective.can_write);
    assert!(!effective.can_delete);
}

#[tokio::test]
async fn deactivated_record_falls_back_to_read_only() {
    let (svc, _db) = setup().await;

    svc.set_permission(upsert("marketing", Module::Watermarks, (true, true, true)))
        .await
        .unwrap();
    svc.deactivate_permission("marketing", Module::Watermarks)
        .await
        .unwrap();

    let effective = svc
        .effective(Some("marketing"), Role::User, Module::Watermarks)
        .await;
    assert_eq!(effective, policy::READ_ONLY_FALLBACK);
}

// ---------------------------------------------------------------------------
// Matrix materialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn matrix_has_entry_for_every_module() {
    let (svc, _db) = setup().await;

    svc.set_permission(upsert("it", Module::Assets, (true, true, true)))
        .await
        .unwrap();

    let matrix = svc.effective_matrix(Some("it"), Role::User).await;
    assert_eq!(matrix.len(), Module::ALL.len());

    // Explicit grant applies; unconfigured modules get the fallback.
    assert!(matrix[&Module::Assets].can_delete);
    assert_eq!(matrix[&Module::Reports], policy::READ_ONLY_FALLBACK);
}

#[tokio::test]
async fn admin_matrix_is_full_access_everywhere() {
    let (svc, _db) = setup().await;

    let matrix = svc.effective_matrix(None, Role::Admin).await;
    assert!(matrix.values().all(|p| *p == policy::FULL_ACCESS));
}

// ---------------------------------------------------------------------------
// Administrative surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_permission_rejects_empty_department() {
    let (svc, _db) = setup().await;

    let err = svc
        .set_permission(upsert("  ", Module::Assets, (true, false, false)))
        .await
        .unwrap_err();
    assert!(matches!(err, DepotError::Validation { .. }));
}

#[tokio::test]
async fn set_permission_twice_leaves_one_record() {
    let (svc, _db) = setup().await;

    svc.set_permission(upsert("it", Module::Users, (true, true, false)))
        .await
        .unwrap();
    svc.set_permission(upsert("it", Module::Users, (true, false, false)))
        .await
        .unwrap();

    let page = svc
        .list_permissions(Some("it"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(!page.items[0].can_write);
}

// ---------------------------------------------------------------------------
// Degraded storage
// ---------------------------------------------------------------------------

/// A matrix store that is down: every operation fails.
#[derive(Clone)]
struct FailingMatrix;

impl PermissionRepository for FailingMatrix {
    async fn upsert(&self, _input: UpsertPermission) -> DepotResult<PermissionRecord> {
        Err(DepotError::Database("store offline".into()))
    }

    async fn find_active(
        &self,
        _department: &str,
        _module: Module,
    ) -> DepotResult<Option<PermissionRecord>> {
        Err(DepotError::Database("store offline".into()))
    }

    async fn list_active_for_department(
        &self,
        _department: &str,
    ) -> DepotResult<Vec<PermissionRecord>> {
        Err(DepotError::Database("store offline".into()))
    }

    async fn list_active(
        &self,
        _department: Option<&str>,
        _pagination: Pagination,
    ) -> DepotResult<PaginatedResult<PermissionRecord>> {
        Err(DepotError::Database("store offline".into()))
    }

    async fn deactivate(&self, _department: &str, _module: Module) -> DepotResult<()> {
        Err(DepotError::Database("store offline".into()))
    }
}

#[tokio::test]
async fn degraded_store_resolves_to_read_only() {
    let svc = PermissionService::new(FailingMatrix);

    let effective = svc
        .effective(Some("marketing"), Role::User, Module::Assets)
        .await;
    assert_eq!(effective, policy::READ_ONLY_FALLBACK);
}

#[tokio::test]
async fn degraded_store_matrix_is_read_only_everywhere() {
    let svc = PermissionService::new(FailingMatrix);

    let matrix = svc.effective_matrix(Some("marketing"), Role::User).await;
    assert_eq!(matrix.len(), Module::ALL.len());
    assert!(matrix.values().all(|p| *p == policy::READ_ONLY_FALLBACK));
}

#[tokio::test]
async fn degraded_store_still_fails_admin_writes() {
    let svc = PermissionService::new(FailingMatrix);

    // Mutation availability is sacrificed before view availability.
    let err = svc
        .set_permission(upsert("it", Module::Assets, (true, true, false)))
        .await
        .unwrap_err();
    assert!(matches!(err, DepotError::Database(_)));
}

// ---------------------------------------------------------------------------
// Audit recorder
// ---------------------------------------------------------------------------

/// An audit sink that is down: every append fails.
#[derive(Clone)]
struct FailingAuditLog;

impl AuditLogRepository for FailingAuditLog {
    async fn append(
        &self,
        _input: CreateAuditEvent,
    ) -> DepotResult<depot_core::models::audit::AuditEvent> {
        Err(DepotError::Database("audit sink offline".into()))
    }

    async fn list(
        &self,
        _pagination: Pagination,
    ) -> DepotResult<PaginatedResult<depot_core::models::audit::AuditEvent>> {
        Err(DepotError::Database("audit sink offline".into()))
    }
}

fn audit_event(action: &str) -> CreateAuditEvent {
    CreateAuditEvent {
        actor_id: Uuid::new_v4(),
        action: action.into(),
        module: Some(Module::Assets),
        target: None,
        outcome: AuditOutcome::Success,
        metadata: None,
    }
}

#[tokio::test]
async fn audit_event_lands_in_the_log() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    depot_db::run_migrations(&db).await.unwrap();

    let log = SurrealAuditLogRepository::new(db.clone());
    let recorder = AuditRecorder::new(log.clone());

    recorder.record(audit_event("permission.upsert"));

    // The append runs on a spawned task; poll until it lands.
    let mut total = 0;
    for _ in 0..100 {
        total = log.list(Pagination::default()).await.unwrap().total;
        if total > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(total, 1);
}

#[tokio::test]
async fn failed_audit_append_is_swallowed() {
    let recorder = AuditRecorder::new(FailingAuditLog);

    // Must not panic or propagate; give the spawned task a chance to run.
    recorder.record(audit_event("permission.deactivate"));
    tokio::time::sleep(Duration::from_millis(20)).await;
}
