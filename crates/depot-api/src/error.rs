//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Unauthenticated (401) and Forbidden (403) are deliberately distinct
//! signals so clients can tell "log in again" from "you don't have
//! access".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use depot_core::error::DepotError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DepotError> for ApiError {
    fn from(err: DepotError) -> Self {
        match err {
            DepotError::Unauthenticated { reason } => ApiError::Unauthenticated(reason),
            DepotError::Forbidden { reason } => ApiError::Forbidden(reason),
            DepotError::NotFound { entity, key } => {
                ApiError::NotFound(format!("{entity} {key}"))
            }
            DepotError::AlreadyExists { entity, key } => {
                ApiError::Conflict(format!("{entity} {key} already exists"))
            }
            DepotError::Validation { message } => ApiError::BadRequest(message),
            DepotError::Database(msg) | DepotError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::Internal(m) => {
                tracing::error!(error = %m, "internal error in API handler");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
