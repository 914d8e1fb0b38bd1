//! SurrealDB implementation of [`AuditLogRepository`].

use chrono::{DateTime, Utc};
use depot_core::error::DepotResult;
use depot_core::models::audit::{AuditEvent, AuditOutcome, CreateAuditEvent};
use depot_core::models::module::Module;
use depot_core::repository::{AuditLogRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AuditRow {
    actor_id: String,
    action: String,
    module: Option<String>,
    target: Option<String>,
    outcome: String,
    metadata: serde_json::Value,
    timestamp: DateTime<Utc>,
}

impl AuditRow {
    fn try_into_event(self) -> Result<AuditEvent, DbError> {
        let actor_id = Uuid::parse_str(&self.actor_id)
            .map_err(|e| DbError::Decode(format!("invalid actor UUID: {e}")))?;
        let module = match self.module {
            Some(m) => Some(
                m.parse::<Module>()
                    .map_err(|_| DbError::Decode(format!("invalid module: {m}")))?,
            ),
            None => None,
        };
        let outcome = match self.outcome.as_str() {
            "SUCCESS" => AuditOutcome::Success,
            "DENIED" => AuditOutcome::Denied,
            "FAILURE" => AuditOutcome::Failure,
            other => return Err(DbError::Decode(format!("invalid outcome: {other}"))),
        };
        Ok(AuditEvent {
            actor_id,
            action: self.action,
            module,
            target: self.target,
            outcome,
            metadata: self.metadata,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn outcome_str(outcome: AuditOutcome) -> &'static str {
    match outcome {
        AuditOutcome::Success => "SUCCESS",
        AuditOutcome::Denied => "DENIED",
        AuditOutcome::Failure => "FAILURE",
    }
}

/// SurrealDB implementation of the append-only audit log.
#[derive(Clone)]
pub struct SurrealAuditLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAuditLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AuditLogRepository for SurrealAuditLogRepository<C> {
    async fn append(&self, input: CreateAuditEvent) -> DepotResult<AuditEvent> {
        let result = self
            .db
            .query(
                "CREATE audit_log SET \
                 actor_id = $actor_id, action = $action, \
                 module = $module, target = $target, \
                 outcome = $outcome, metadata = $metadata",
            )
            .bind(("actor_id", input.actor_id.to_string()))
            .bind(("action", input.action))
            .bind(("module", input.module.map(|m| m.as_str().to_string())))
            .bind(("target", input.target))
            .bind(("outcome", outcome_str(input.outcome).to_string()))
            .bind(("metadata", input.metadata.unwrap_or_else(|| serde_json::json!({}))))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit_log".into(),
            key: "new".into(),
        })?;

        Ok(row.try_into_event()?)
    }

    async fn list(&self, pagination: Pagination) -> DepotResult<PaginatedResult<AuditEvent>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM audit_log GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT * FROM audit_log \
                 ORDER BY timestamp DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_event())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
