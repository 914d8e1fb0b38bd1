//! Domain models for DEPOT.
//!
//! These are the core types shared across all crates.

pub mod audit;
pub mod department;
pub mod identity;
pub mod module;
pub mod permission;
