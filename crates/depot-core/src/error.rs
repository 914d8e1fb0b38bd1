//! Error types for the DEPOT permission core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepotError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Entity already exists: {entity} with key {key}")]
    AlreadyExists { entity: String, key: String },

    #[error("Unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DepotResult<T> = Result<T, DepotError>;
