//! Shared test mocks and utilities for the product catalog service.

mod clock;
mod queue;
mod repository;

pub use clock::FixedClock;
pub use queue::{FailingNotificationQueue, RecordingNotificationQueue};
pub use repository::{
    FailingProductRepository, FailingRatingRepository, InMemoryProductRepository,
    InMemoryRatingRepository, UnreadableRatingRepository, product, rating,
};
