//! DEPOT Access — the permission resolver service and the
//! fire-and-forget audit recorder.
//!
//! Generic over the `depot-core` repository traits so this crate has
//! no dependency on the database crate.

pub mod audit;
pub mod service;

pub use audit::AuditRecorder;
pub use service::PermissionService;
