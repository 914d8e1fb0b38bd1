//! DEPOT Core — domain models, error types, repository traits, and the
//! permission resolution policy.
//!
//! This crate has no I/O. Storage and transport concerns live in
//! `depot-db` and `depot-api`; this crate defines the contracts they
//! implement and the pure decision logic they share.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;

pub use error::{DepotError, DepotResult};
