//! `PostgreSQL` implementation of the `NotificationQueue` trait.
//!
//! Messages are written to the `notification_queue` outbox table and announced
//! on a `LISTEN`/`NOTIFY` channel in the same transaction, so listeners only
//! hear about rows that were committed. The notification carries only the
//! message ID and event name; listeners read the payload from the table.

use async_trait::async_trait;
use sqlx::PgPool;

use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::queue::{NotificationQueue, QueueMessage};

/// Channel that committed messages are announced on.
pub const NOTIFY_CHANNEL: &str = "catalog_events";

fn publication_error(err: &sqlx::Error) -> DomainError {
    DomainError::Publication(err.to_string())
}

/// PostgreSQL-backed notification queue.
#[derive(Debug, Clone)]
pub struct PgNotificationQueue {
    pool: PgPool,
}

impl PgNotificationQueue {
    /// Creates a new `PgNotificationQueue`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationQueue for PgNotificationQueue {
    async fn save(&self, ctx: &RequestContext, message: QueueMessage) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| publication_error(&e))?;

        sqlx::query(
            r"
            INSERT INTO notification_queue
                (message_id, event_name, payload, correlation_id, occurred_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(message.message_id)
        .bind(&message.event_name)
        .bind(&message.payload)
        .bind(message.correlation_id)
        .bind(message.occurred_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| publication_error(&e))?;

        let announcement = serde_json::json!({
            "message_id": message.message_id,
            "event_name": message.event_name,
        });
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(NOTIFY_CHANNEL)
            .bind(announcement.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| publication_error(&e))?;

        tx.commit().await.map_err(|e| publication_error(&e))?;

        tracing::debug!(
            correlation_id = %ctx.correlation_id,
            message_id = %message.message_id,
            event_name = %message.event_name,
            "message enqueued"
        );
        Ok(())
    }
}
