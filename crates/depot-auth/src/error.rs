//! Authentication error types.

use depot_core::error::DepotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for DepotError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => DepotError::Unauthenticated {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => DepotError::Internal(msg),
        }
    }
}
