//! Shared application state.

use std::sync::Arc;

use catalog_core::clock::{Clock, SystemClock};
use catalog_core::queue::NotificationQueue;
use catalog_core::repository::{ProductRepository, RatingRepository};
use catalog_products::application::product_service::ProductPorts;
use catalog_store::pg_notification_queue::PgNotificationQueue;
use catalog_store::pg_product_repository::PgProductRepository;
use catalog_store::pg_rating_repository::PgRatingRepository;
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product persistence.
    pub products: Arc<dyn ProductRepository>,
    /// Rating persistence.
    pub ratings: Arc<dyn RatingRepository>,
    /// Notification queue for domain events.
    pub queue: Arc<dyn NotificationQueue>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state from explicit collaborators.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductRepository>,
        ratings: Arc<dyn RatingRepository>,
        queue: Arc<dyn NotificationQueue>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            ratings,
            queue,
            clock,
        }
    }

    /// Create application state backed by PostgreSQL and the system clock.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgProductRepository::new(pool.clone())),
            Arc::new(PgRatingRepository::new(pool.clone())),
            Arc::new(PgNotificationQueue::new(pool)),
            Arc::new(SystemClock),
        )
    }

    /// Borrows the collaborators for a per-request `ProductService`.
    #[must_use]
    pub fn ports(&self) -> ProductPorts<'_> {
        ProductPorts {
            products: self.products.as_ref(),
            ratings: self.ratings.as_ref(),
            queue: self.queue.as_ref(),
            clock: self.clock.as_ref(),
        }
    }
}
