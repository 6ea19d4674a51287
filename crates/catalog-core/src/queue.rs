//! Notification queue abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::DomainError;
use crate::event::DomainEvent;

/// A message ready to be handed to the notification queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    /// Unique message identifier (the originating event ID).
    pub message_id: Uuid,
    /// Event name consumers subscribe to.
    pub event_name: String,
    /// Event payload.
    pub payload: serde_json::Value,
    /// Correlation ID of the request that produced the message.
    pub correlation_id: Uuid,
    /// When the originating event occurred.
    pub occurred_at: DateTime<Utc>,
}

impl QueueMessage {
    /// Builds a message from a domain event.
    #[must_use]
    pub fn from_event(event: &impl DomainEvent) -> Self {
        let meta = event.metadata();
        Self {
            message_id: meta.event_id,
            event_name: event.event_type().to_owned(),
            payload: event.to_payload(),
            correlation_id: meta.correlation_id,
            occurred_at: meta.occurred_at,
        }
    }
}

/// Port to the realtime notification queue.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Persists and enqueues `message`.
    async fn save(&self, ctx: &RequestContext, message: QueueMessage) -> Result<(), DomainError>;
}
