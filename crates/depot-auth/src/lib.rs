//! DEPOT Auth — the identity resolver: EdDSA JWT issuance and
//! verification, turning a bearer credential into a verified
//! [`depot_core::models::identity::Identity`].

pub mod config;
pub mod error;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use token::{AccessTokenClaims, issue_access_token, verify_access_token};
