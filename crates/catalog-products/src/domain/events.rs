//! Domain events for the product catalog context.

use catalog_core::event::{DomainEvent, EventMetadata};
use catalog_core::repository::Rating;
use serde::{Deserialize, Serialize};

/// Event type string for [`RatingAdded`].
pub const RATING_ADDED_EVENT_TYPE: &str = "product-rating:added";

/// Emitted after a rating has been persisted and re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAdded {
    /// The hydrated rating.
    pub rating: Rating,
    /// The rated product.
    pub product_id: i64,
}

/// Event payload variants for the product catalog context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEventKind {
    /// A rating has been added to a product.
    RatingAdded(RatingAdded),
}

/// Domain event envelope for the product catalog context.
#[derive(Debug, Clone)]
pub struct ProductEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ProductEventKind,
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ProductEventKind::RatingAdded(_) => RATING_ADDED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        match &self.kind {
            ProductEventKind::RatingAdded(payload) => serde_json::to_value(payload)
                .expect("RatingAdded serialization is infallible"),
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use catalog_test_support::{FixedClock, rating};
    use catalog_core::clock::Clock;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_rating_added_payload_has_rating_and_product_id_only() {
        let hydrated = rating(9, 1, 5, "Great product");
        let event = ProductEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: RATING_ADDED_EVENT_TYPE.to_owned(),
                correlation_id: Uuid::new_v4(),
                occurred_at: FixedClock::standard().now(),
            },
            kind: ProductEventKind::RatingAdded(RatingAdded {
                rating: hydrated.clone(),
                product_id: 1,
            }),
        };

        let payload = event.to_payload();

        assert_eq!(event.event_type(), "product-rating:added");
        assert_eq!(payload.as_object().unwrap().len(), 2);
        assert_eq!(payload["product_id"], 1);
        assert_eq!(payload["rating"]["id"], 9);
        assert_eq!(payload["rating"]["review"], "Great product");
        let decoded: RatingAdded = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded.rating, hydrated);
    }
}
