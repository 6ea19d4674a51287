//! Per-request product service.
//!
//! A `ProductService` is bound to one caller's `RequestContext` and to the
//! ports it talks to. Each operation is a strict sequence of port calls that
//! stops at the first failure; errors are returned to the caller unchanged.

use catalog_core::clock::Clock;
use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventMetadata};
use catalog_core::queue::{NotificationQueue, QueueMessage};
use catalog_core::repository::{NewRating, Product, ProductRepository, Rating, RatingRepository};
use serde_json::Value;
use uuid::Uuid;

use crate::application::validation;
use crate::domain::events::{ProductEvent, ProductEventKind, RATING_ADDED_EVENT_TYPE, RatingAdded};
use crate::domain::review::{ReviewSubmission, ValidatedReview};
use crate::domain::views::ProductWithRatings;

/// The collaborators a `ProductService` is wired to.
#[derive(Clone, Copy)]
pub struct ProductPorts<'a> {
    /// Product persistence.
    pub products: &'a dyn ProductRepository,
    /// Rating persistence.
    pub ratings: &'a dyn RatingRepository,
    /// Notification queue for domain events.
    pub queue: &'a dyn NotificationQueue,
    /// Time source for event metadata.
    pub clock: &'a dyn Clock,
}

/// Validates, orchestrates and exposes product and rating operations for one
/// caller.
pub struct ProductService<'a> {
    ctx: RequestContext,
    ports: ProductPorts<'a>,
}

impl<'a> ProductService<'a> {
    /// Binds a service to `ctx` and `ports`.
    #[must_use]
    pub fn new(ctx: RequestContext, ports: ProductPorts<'a>) -> Self {
        Self { ctx, ports }
    }

    /// Returns the context this service is bound to.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Validates a review submission. See
    /// [`validation::validate_review_request`] for the rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every violated field.
    pub fn validate_review_request(
        &self,
        submission: &ReviewSubmission,
    ) -> Result<ValidatedReview, DomainError> {
        validation::validate_review_request(submission)
    }

    /// Returns every product exactly as the data layer provides them.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged.
    #[tracing::instrument(skip(self), fields(correlation_id = %self.ctx.correlation_id))]
    pub async fn list_all_products(&self) -> Result<Vec<Product>, DomainError> {
        let products = self.ports.products.get_all(&self.ctx).await?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Loads a product and attaches its ratings.
    ///
    /// The ratings lookup only runs once the product lookup has succeeded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `id` is not positive,
    /// `DomainError::NotFound` if the product does not exist, and any
    /// repository error unchanged.
    #[tracing::instrument(skip(self), fields(correlation_id = %self.ctx.correlation_id))]
    pub async fn get_product_with_ratings(
        &self,
        id: i64,
    ) -> Result<ProductWithRatings, DomainError> {
        if id <= 0 {
            return Err(DomainError::invalid("id", "id must be a positive integer"));
        }

        let product = self.ports.products.find_by_id(&self.ctx, id).await?;
        let ratings = self
            .ports
            .ratings
            .get_all_by_product_id(&self.ctx, id)
            .await?;
        tracing::debug!(ratings = ratings.len(), "loaded product with ratings");

        Ok(ProductWithRatings { product, ratings })
    }

    /// Adds a rating to a product. Shorthand for [`Self::submit_rating`] with
    /// every field present.
    ///
    /// # Errors
    ///
    /// See [`Self::submit_rating`].
    pub async fn add_rating(
        &self,
        product_id: i64,
        rating: f64,
        review: &str,
    ) -> Result<Rating, DomainError> {
        self.submit_rating(&ReviewSubmission::new(product_id, rating, review))
            .await
    }

    /// Validates a submission, persists the rating, re-reads it to pick up
    /// generated fields, and publishes `product-rating:added` with the
    /// re-read rating. Returns the re-read rating.
    ///
    /// A rating whose publication fails stays persisted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` before any side effect when the
    /// submission is invalid, otherwise the first repository or queue error.
    pub async fn submit_rating(
        &self,
        submission: &ReviewSubmission,
    ) -> Result<Rating, DomainError> {
        let review = self.validate_review_request(submission)?;
        self.record_rating(review).await
    }

    /// Same as [`Self::submit_rating`] for a JSON request body that has not
    /// been decoded yet, so mistyped fields are reported with every other
    /// violation.
    ///
    /// # Errors
    ///
    /// See [`Self::submit_rating`].
    pub async fn submit_rating_body(
        &self,
        product_id: i64,
        body: &Value,
    ) -> Result<Rating, DomainError> {
        let review = validation::validate_review_body(product_id, body)?;
        self.record_rating(review).await
    }

    #[tracing::instrument(skip_all, fields(correlation_id = %self.ctx.correlation_id))]
    async fn record_rating(&self, review: ValidatedReview) -> Result<Rating, DomainError> {
        let new_rating = NewRating {
            product_id: review.product_id,
            rating: review.rating,
            review: review.review,
        };
        let rating_id = self.ports.ratings.create(&self.ctx, &new_rating).await?;
        tracing::debug!(rating_id, "rating created");

        let rating = self.ports.ratings.find_by_id(&self.ctx, rating_id).await?;

        let event = self.rating_added(rating.clone());
        if let Err(err) = self
            .ports
            .queue
            .save(&self.ctx, QueueMessage::from_event(&event))
            .await
        {
            tracing::warn!(
                rating_id,
                error = %err,
                "rating persisted but event publication failed"
            );
            return Err(err);
        }

        tracing::info!(
            rating_id,
            product_id = rating.product_id,
            event_id = %event.metadata().event_id,
            "rating added"
        );
        Ok(rating)
    }

    fn rating_added(&self, rating: Rating) -> ProductEvent {
        ProductEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: RATING_ADDED_EVENT_TYPE.to_owned(),
                correlation_id: self.ctx.correlation_id,
                occurred_at: self.ports.clock.now(),
            },
            kind: ProductEventKind::RatingAdded(RatingAdded {
                product_id: rating.product_id,
                rating,
            }),
        }
    }
}
