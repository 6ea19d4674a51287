//! Review submissions and their validated form.

use serde::{Deserialize, Serialize};

/// Inbound review submission. Every field is optional so that a missing
/// field is reported as a violation rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    /// The product being reviewed.
    pub product_id: Option<i64>,
    /// Score, expected to be a whole number from 1 to 5.
    pub rating: Option<f64>,
    /// Free-text review.
    pub review: Option<String>,
}

impl ReviewSubmission {
    /// Creates a submission with every field present.
    #[must_use]
    pub fn new(product_id: i64, rating: f64, review: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id),
            rating: Some(rating),
            review: Some(review.into()),
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedReview {
    /// The product being reviewed.
    pub product_id: i64,
    /// Score from 1 to 5.
    pub rating: i32,
    /// Trimmed, non-empty review text.
    pub review: String,
}
