//! Read-only views returned by the product service.

use catalog_core::repository::{Product, Rating};
use serde::Serialize;

/// A product with its ratings attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductWithRatings {
    /// The product record.
    #[serde(flatten)]
    pub product: Product,
    /// Ratings for the product, in the order the data layer returned them.
    pub ratings: Vec<Rating>,
}
