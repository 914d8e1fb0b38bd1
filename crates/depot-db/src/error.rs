//! Database-specific error types and conversions.

use depot_core::error::DepotError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Record already exists: {entity} with key {key}")]
    AlreadyExists { entity: String, key: String },

    #[error("Stored row could not be decoded: {0}")]
    Decode(String),
}

impl From<DbError> for DepotError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => DepotError::NotFound { entity, key },
            DbError::AlreadyExists { entity, key } => DepotError::AlreadyExists { entity, key },
            other => DepotError::Database(other.to_string()),
        }
    }
}
