//! DEPOT Database — SurrealDB connection management, schema
//! migrations, seeding, and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Idempotent department seeding ([`seed_departments`])
//! - SurrealDB implementations of the `depot-core` repository traits

mod connection;
mod error;
mod schema;
mod seed;

pub mod repository;

pub use connection::DbConfig;
pub use error::DbError;
pub use schema::run_migrations;
pub use seed::seed_departments;
