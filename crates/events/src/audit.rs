//! Structured log of every admin mutation.

use tokio::sync::broadcast;

use crate::bus::AdminEvent;

pub struct AuditLog;

impl AuditLog {
    /// Log mutation events until the bus is dropped.
    ///
    /// Notices are skipped. Returns how many mutations were logged.
    pub async fn run(mut receiver: broadcast::Receiver<AdminEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(AdminEvent::Mutation {
                    action,
                    entity,
                    id,
                    actor,
                    ..
                }) => {
                    logged += 1;
                    tracing::info!(
                        ?action,
                        entity = %entity,
                        id = %id,
                        actor = actor.as_deref().unwrap_or("-"),
                        "Admin mutation"
                    );
                }
                Ok(AdminEvent::Notice { .. }) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Audit log lagged, some mutations were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, audit log shutting down");
                    break;
                }
            }
        }
        logged
    }
}
