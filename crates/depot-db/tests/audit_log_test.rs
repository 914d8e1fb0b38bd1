//! Integration tests for the append-only audit log using in-memory
//! SurrealDB.

use depot_core::models::audit::{AuditOutcome, CreateAuditEvent};
use depot_core::models::module::Module;
use depot_core::repository::{AuditLogRepository, Pagination};
use depot_db::repository::SurrealAuditLogRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealAuditLogRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    depot_db::run_migrations(&db).await.unwrap();
    SurrealAuditLogRepository::new(db)
}

#[tokio::test]
async fn append_and_list() {
    let repo = setup().await;
    let actor = Uuid::new_v4();

    let event = repo
        .append(CreateAuditEvent {
            actor_id: actor,
            action: "permission.upsert".into(),
            module: Some(Module::DigitalAssets),
            target: Some("marketing/DIGITAL_ASSETS".into()),
            outcome: AuditOutcome::Success,
            metadata: Some(serde_json::json!({"can_write": true})),
        })
        .await
        .unwrap();

    assert_eq!(event.actor_id, actor);
    assert_eq!(event.module, Some(Module::DigitalAssets));
    assert_eq!(event.outcome, AuditOutcome::Success);

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].action, "permission.upsert");
}

#[tokio::test]
async fn events_without_module_or_target() {
    let repo = setup().await;

    let event = repo
        .append(CreateAuditEvent {
            actor_id: Uuid::new_v4(),
            action: "department.create".into(),
            module: None,
            target: None,
            outcome: AuditOutcome::Failure,
            metadata: None,
        })
        .await
        .unwrap();

    assert!(event.module.is_none());
    assert!(event.target.is_none());
}

#[tokio::test]
async fn list_paginates() {
    let repo = setup().await;
    let actor = Uuid::new_v4();

    for action in ["first", "second", "third"] {
        repo.append(CreateAuditEvent {
            actor_id: actor,
            action: action.into(),
            module: None,
            target: None,
            outcome: AuditOutcome::Success,
            metadata: None,
        })
        .await
        .unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
}
