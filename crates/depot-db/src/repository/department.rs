//! SurrealDB implementation of [`DepartmentRepository`].

use chrono::{DateTime, Utc};
use depot_core::error::DepotResult;
use depot_core::models::department::{CreateDepartment, Department, UpdateDepartment};
use depot_core::repository::{DepartmentRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct DepartmentRow {
    slug: String,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            slug: row.slug,
            name: row.name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the department registry.
#[derive(Clone)]
pub struct SurrealDepartmentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDepartmentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DepartmentRepository for SurrealDepartmentRepository<C> {
    async fn create(&self, input: CreateDepartment) -> DepotResult<Department> {
        // The slug doubles as the record id, so CREATE fails on
        // duplicates — the uniqueness guarantee lives in the storage
        // layer, not here.
        let result = self
            .db
            .query(
                "CREATE type::record('department', $slug) SET \
                 slug = $slug, name = $name",
            )
            .bind(("slug", input.slug.clone()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = match result.check() {
            Ok(result) => result,
            // Only the record-id collision is a duplicate; any other
            // check failure is a storage error and must surface as one.
            Err(e) if e.to_string().contains("already exists") => {
                return Err(DbError::AlreadyExists {
                    entity: "department".into(),
                    key: input.slug,
                }
                .into());
            }
            Err(e) => return Err(DbError::Surreal(e).into()),
        };

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "department".into(),
            key: input.slug,
        })?;

        Ok(row.into())
    }

    async fn get_by_slug(&self, slug: &str) -> DepotResult<Department> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('department', $slug)")
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "department".into(),
            key: slug.to_string(),
        })?;

        Ok(row.into())
    }

    async fn update(&self, slug: &str, input: UpdateDepartment) -> DepotResult<Department> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('department', $slug) SET {} \
             WHERE is_active = true",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("slug", slug.to_string()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "department".into(),
            key: slug.to_string(),
        })?;

        Ok(row.into())
    }

    async fn deactivate(&self, slug: &str) -> DepotResult<()> {
        let mut result = self
            .db
            .query(
                "UPDATE type::record('department', $slug) SET \
                 is_active = false, updated_at = time::now() \
                 WHERE is_active = true",
            )
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "department".into(),
                key: slug.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn list_active(
        &self,
        pagination: Pagination,
    ) -> DepotResult<PaginatedResult<Department>> {
        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM department \
                 WHERE is_active = true GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT * FROM department WHERE is_active = true \
                 ORDER BY slug ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let items = rows.into_iter().map(Department::from).collect();

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
