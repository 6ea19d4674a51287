//! Persistence ports for products and ratings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::DomainError;

/// Stored representation of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price_cents: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Stored representation of a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating identifier.
    pub id: i64,
    /// The rated product.
    pub product_id: i64,
    /// Score from 1 to 5.
    pub rating: i32,
    /// Free-text review.
    pub review: String,
    /// Generated by the data layer on insert.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    /// The rated product.
    pub product_id: i64,
    /// Score from 1 to 5.
    pub rating: i32,
    /// Free-text review.
    pub review: String,
}

/// Repository trait for reading products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load every product, ordered by identifier.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Product>, DomainError>;

    /// Load one product. Fails with `DomainError::NotFound` when absent.
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Product, DomainError>;
}

/// Repository trait for reading and creating ratings.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Load all ratings for a product, in creation order.
    async fn get_all_by_product_id(
        &self,
        ctx: &RequestContext,
        product_id: i64,
    ) -> Result<Vec<Rating>, DomainError>;

    /// Insert a rating and return its generated identifier.
    async fn create(&self, ctx: &RequestContext, rating: &NewRating) -> Result<i64, DomainError>;

    /// Load one rating. Fails with `DomainError::NotFound` when absent.
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Rating, DomainError>;
}
