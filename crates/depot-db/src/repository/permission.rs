//! SurrealDB implementation of [`PermissionRepository`].

use chrono::{DateTime, Utc};
use depot_core::error::DepotResult;
use depot_core::models::module::Module;
use depot_core::models::permission::{PermissionRecord, UpsertPermission};
use depot_core::repository::{PaginatedResult, Pagination, PermissionRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PermissionRow {
    department: String,
    module: String,
    can_read: bool,
    can_write: bool,
    can_delete: bool,
    is_active: bool,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PermissionRow {
    fn try_into_record(self) -> Result<PermissionRecord, DbError> {
        let module: Module = self
            .module
            .parse()
            .map_err(|_| DbError::Decode(format!("invalid module: {}", self.module)))?;
        let created_by = Uuid::parse_str(&self.created_by)
            .map_err(|e| DbError::Decode(format!("invalid creator UUID: {e}")))?;
        Ok(PermissionRecord {
            department: self.department,
            module,
            can_read: self.can_read,
            can_write: self.can_write,
            can_delete: self.can_delete,
            is_active: self.is_active,
            created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Deterministic record key for a (department, module) pair. Making
/// the pair the record id is what lets concurrent writers collapse
/// onto a single row without application-level locking.
fn record_key(department: &str, module: Module) -> String {
    format!("{department}:{module}")
}

/// SurrealDB implementation of the permission matrix repository.
#[derive(Clone)]
pub struct SurrealPermissionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPermissionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PermissionRepository for SurrealPermissionRepository<C> {
    async fn upsert(&self, input: UpsertPermission) -> DepotResult<PermissionRecord> {
        let key = record_key(&input.department, input.module);

        let result = self
            .db
            .query(
                "UPSERT type::record('permission_record', $key) SET \
                 department = $department, module = $module, \
                 can_read = $can_read, can_write = $can_write, \
                 can_delete = $can_delete, is_active = true, \
                 created_by = $created_by, updated_at = time::now()",
            )
            .bind(("key", key.clone()))
            .bind(("department", input.department))
            .bind(("module", input.module.as_str().to_string()))
            .bind(("can_read", input.can_read))
            .bind(("can_write", input.can_write))
            .bind(("can_delete", input.can_delete))
            .bind(("created_by", input.created_by.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "permission_record".into(),
            key,
        })?;

        Ok(row.try_into_record()?)
    }

    async fn find_active(
        &self,
        department: &str,
        module: Module,
    ) -> DepotResult<Option<PermissionRecord>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('permission_record', $key) \
                 WHERE is_active = true",
            )
            .bind(("key", record_key(department, module)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_record()?)),
            None => Ok(None),
        }
    }

    async fn list_active_for_department(
        &self,
        department: &str,
    ) -> DepotResult<Vec<PermissionRecord>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM permission_record \
                 WHERE department = $department AND is_active = true \
                 ORDER BY module ASC",
            )
            .bind(("department", department.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        let records = rows
            .into_iter()
            .map(|row| row.try_into_record())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(records)
    }

    async fn list_active(
        &self,
        department: Option<&str>,
        pagination: Pagination,
    ) -> DepotResult<PaginatedResult<PermissionRecord>> {
        let filter = match department {
            Some(_) => "is_active = true AND department = $department",
            None => "is_active = true",
        };

        let count_query = format!(
            "SELECT count() AS total FROM permission_record \
             WHERE {filter} GROUP ALL"
        );
        let mut builder = self.db.query(&count_query);
        if let Some(dept) = department {
            builder = builder.bind(("department", dept.to_string()));
        }
        let mut count_result = builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let page_query = format!(
            "SELECT * FROM permission_record WHERE {filter} \
             ORDER BY department ASC, module ASC \
             LIMIT $limit START $offset"
        );
        let mut builder = self
            .db
            .query(&page_query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let Some(dept) = department {
            builder = builder.bind(("department", dept.to_string()));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_record())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn deactivate(&self, department: &str, module: Module) -> DepotResult<()> {
        let key = record_key(department, module);

        let mut result = self
            .db
            .query(
                "UPDATE type::record('permission_record', $key) SET \
                 is_active = false, updated_at = time::now() \
                 WHERE is_active = true",
            )
            .bind(("key", key.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "permission_record".into(),
                key,
            }
            .into());
        }

        Ok(())
    }
}
