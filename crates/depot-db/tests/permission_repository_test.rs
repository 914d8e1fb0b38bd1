//! Integration tests for the permission matrix repository using
//! in-memory SurrealDB.

use depot_core::models::module::Module;
use depot_core::models::permission::UpsertPermission;
use depot_core::repository::{Pagination, PermissionRepository};
use depot_db::repository::SurrealPermissionRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

async fn setup() -> SurrealPermissionRepository<surrealdb::engine::local::Db> {
    let (repo, _db) = setup_with_db().await;
    repo
}

async fn setup_with_db() -> (
    SurrealPermissionRepository<surrealdb::engine::local::Db>,
    Surreal<surrealdb::engine::local::Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    depot_db::run_migrations(&db).await.unwrap();
    (SurrealPermissionRepository::new(db.clone()), db)
}

/// Raw row view for asserting what is physically in the table,
/// bypassing the repository's active-only filters.
#[derive(Debug, SurrealValue)]
struct StoredFlags {
    department: String,
    is_active: bool,
}

fn grant(department: &str, module: Module, triple: (bool, bool, bool)) -> UpsertPermission {
    UpsertPermission {
        department: department.into(),
        module,
        can_read: triple.0,
        can_write: triple.1,
        can_delete: triple.2,
        created_by: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn upsert_creates_active_record() {
    let repo = setup().await;

    let record = repo
        .upsert(grant("marketing", Module::DigitalAssets, (true, false, false)))
        .await
        .unwrap();

    assert_eq!(record.department, "marketing");
    assert_eq!(record.module, Module::DigitalAssets);
    assert!(record.is_active);
    assert!(record.can_read);
    assert!(!record.can_write);

    let found = repo
        .find_active("marketing", Module::DigitalAssets)
        .await
        .unwrap()
        .expect("record should be findable");
    assert_eq!(found.module, Module::DigitalAssets);
}

#[tokio::test]
async fn upsert_is_idempotent() {
    let repo = setup().await;
    let input = grant("marketing", Module::Documents, (true, true, false));

    repo.upsert(input.clone()).await.unwrap();
    repo.upsert(input).await.unwrap();

    let page = repo
        .list_active(Some("marketing"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1, "upserting twice must leave one record");
    assert!(page.items[0].can_write);
}

#[tokio::test]
async fn upsert_overwrites_existing_record() {
    let repo = setup().await;

    repo.upsert(grant("it", Module::Assets, (true, true, true)))
        .await
        .unwrap();
    repo.upsert(grant("it", Module::Assets, (true, false, false)))
        .await
        .unwrap();

    let page = repo
        .list_active(Some("it"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1, "overwrite must not duplicate the row");

    let record = &page.items[0];
    assert!(record.can_read);
    assert!(!record.can_write, "last writer wins");
    assert!(!record.can_delete);
}

#[tokio::test]
async fn find_active_ignores_other_pairs() {
    let repo = setup().await;

    repo.upsert(grant("marketing", Module::Assets, (true, true, false)))
        .await
        .unwrap();

    assert!(
        repo.find_active("marketing", Module::Documents)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_active("it", Module::Assets)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn deactivate_hides_record_but_keeps_row() {
    let (repo, db) = setup_with_db().await;

    repo.upsert(grant("marketing", Module::Watermarks, (true, true, true)))
        .await
        .unwrap();
    repo.deactivate("marketing", Module::Watermarks)
        .await
        .unwrap();

    // Invisible to resolution and to active listings.
    assert!(
        repo.find_active("marketing", Module::Watermarks)
            .await
            .unwrap()
            .is_none()
    );
    let page = repo.list_active(None, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(
        repo.list_active_for_department("marketing")
            .await
            .unwrap()
            .is_empty()
    );

    // But the row itself still exists in the table, flagged inactive.
    let mut result = db
        .query("SELECT department, is_active FROM permission_record")
        .await
        .unwrap();
    let rows: Vec<StoredFlags> = result.take(0).unwrap();
    assert_eq!(rows.len(), 1, "soft delete must keep the physical row");
    assert_eq!(rows[0].department, "marketing");
    assert!(!rows[0].is_active);
}

#[tokio::test]
async fn deactivate_missing_record_is_not_found() {
    let repo = setup().await;

    let err = repo.deactivate("nowhere", Module::Assets).await.unwrap_err();
    assert!(matches!(err, depot_core::DepotError::NotFound { .. }));
}

#[tokio::test]
async fn deactivate_then_upsert_reactivates() {
    let repo = setup().await;

    repo.upsert(grant("it", Module::Settings, (true, false, false)))
        .await
        .unwrap();
    repo.deactivate("it", Module::Settings).await.unwrap();
    repo.upsert(grant("it", Module::Settings, (true, true, false)))
        .await
        .unwrap();

    let found = repo
        .find_active("it", Module::Settings)
        .await
        .unwrap()
        .expect("re-upserted record should be active again");
    assert!(found.can_write);

    let page = repo.list_active(None, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1, "reactivation reuses the single row");
}

#[tokio::test]
async fn list_active_for_department_returns_only_that_department() {
    let repo = setup().await;

    repo.upsert(grant("marketing", Module::Assets, (true, true, false)))
        .await
        .unwrap();
    repo.upsert(grant("marketing", Module::Documents, (true, false, false)))
        .await
        .unwrap();
    repo.upsert(grant("it", Module::Assets, (true, true, true)))
        .await
        .unwrap();

    let records = repo
        .list_active_for_department("marketing")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.department == "marketing"));
}

#[tokio::test]
async fn list_active_paginates() {
    let repo = setup().await;

    for module in [Module::Assets, Module::Documents, Module::Users] {
        repo.upsert(grant("it", module, (true, false, false)))
            .await
            .unwrap();
    }

    let page = repo
        .list_active(
            None,
            Pagination {
                offset: 0,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);

    let rest = repo
        .list_active(
            None,
            Pagination {
                offset: 2,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
}
