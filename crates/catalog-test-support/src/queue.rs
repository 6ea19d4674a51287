//! Test queues — mock `NotificationQueue` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::queue::{NotificationQueue, QueueMessage};

/// A queue that records every saved message together with the context it was
/// saved under, and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingNotificationQueue {
    saved: Mutex<Vec<(RequestContext, QueueMessage)>>,
}

impl RecordingNotificationQueue {
    /// Create an empty recording queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all saved messages.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_messages(&self) -> Vec<QueueMessage> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Returns the contexts `save` was called with, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_contexts(&self) -> Vec<RequestContext> {
        self.saved.lock().unwrap().iter().map(|(ctx, _)| *ctx).collect()
    }
}

#[async_trait]
impl NotificationQueue for RecordingNotificationQueue {
    async fn save(&self, ctx: &RequestContext, message: QueueMessage) -> Result<(), DomainError> {
        self.saved.lock().unwrap().push((*ctx, message));
        Ok(())
    }
}

/// A queue that rejects every message while counting the attempts. Useful for
/// testing the "persisted but not published" path.
#[derive(Debug, Default)]
pub struct FailingNotificationQueue {
    attempts: Mutex<usize>,
}

impl FailingNotificationQueue {
    /// Create a failing queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl NotificationQueue for FailingNotificationQueue {
    async fn save(&self, _ctx: &RequestContext, _message: QueueMessage) -> Result<(), DomainError> {
        *self.attempts.lock().unwrap() += 1;
        Err(DomainError::Publication("broker unavailable".into()))
    }
}
