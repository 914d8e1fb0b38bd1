//! SurrealDB repository implementations.

mod audit;
mod department;
mod permission;

pub use audit::SurrealAuditLogRepository;
pub use department::SurrealDepartmentRepository;
pub use permission::SurrealPermissionRepository;
