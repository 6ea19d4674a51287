//! Per-request caller context.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Context of the caller a service instance is bound to.
///
/// Created once per inbound request and handed, unmodified, to every port
/// call made while serving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation ID to trace the request through its effects.
    pub correlation_id: Uuid,
    /// When the request was received.
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context with an explicit correlation ID.
    #[must_use]
    pub fn new(correlation_id: Uuid, received_at: DateTime<Utc>) -> Self {
        Self {
            correlation_id,
            received_at,
        }
    }

    /// Creates a context with a freshly generated correlation ID.
    #[must_use]
    pub fn generate(received_at: DateTime<Utc>) -> Self {
        Self::new(Uuid::new_v4(), received_at)
    }
}
