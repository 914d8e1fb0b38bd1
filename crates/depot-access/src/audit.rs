//! Fire-and-forget audit recording.

use depot_core::models::audit::CreateAuditEvent;
use depot_core::repository::AuditLogRepository;
use tracing::warn;

/// Records audit events without blocking or failing the operation
/// that produced them.
///
/// Appends run on a spawned task; a failed append is logged for
/// operators and otherwise dropped.
#[derive(Clone)]
pub struct AuditRecorder<A> {
    log: A,
}

impl<A> AuditRecorder<A>
where
    A: AuditLogRepository + Clone + 'static,
{
    pub fn new(log: A) -> Self {
        Self { log }
    }

    pub fn record(&self, event: CreateAuditEvent) {
        let log = self.log.clone();
        tokio::spawn(async move {
            if let Err(e) = log.append(event).await {
                warn!(error = %e, "audit event could not be recorded");
            }
        });
    }
}
