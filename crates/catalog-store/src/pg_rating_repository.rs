//! `PostgreSQL` implementation of the `RatingRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::repository::{NewRating, Rating, RatingRepository};

use crate::persistence_error;

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: i64,
    product_id: i64,
    rating: i32,
    review: String,
    created_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            rating: row.rating,
            review: row.review,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed rating repository.
#[derive(Debug, Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    /// Creates a new `PgRatingRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn get_all_by_product_id(
        &self,
        ctx: &RequestContext,
        product_id: i64,
    ) -> Result<Vec<Rating>, DomainError> {
        let rows: Vec<RatingRow> = sqlx::query_as(
            r"
            SELECT id, product_id, rating, review, created_at
            FROM product_ratings
            WHERE product_id = $1
            ORDER BY id
            ",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %ctx.correlation_id,
                error = %e,
                "rating listing failed"
            );
            persistence_error(&e)
        })?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn create(&self, ctx: &RequestContext, rating: &NewRating) -> Result<i64, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO product_ratings (product_id, rating, review)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(rating.product_id)
        .bind(rating.rating)
        .bind(&rating.review)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %ctx.correlation_id,
                error = %e,
                "rating insert failed"
            );
            persistence_error(&e)
        })?;

        Ok(id)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Rating, DomainError> {
        let row: Option<RatingRow> = sqlx::query_as(
            "SELECT id, product_id, rating, review, created_at FROM product_ratings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %ctx.correlation_id,
                error = %e,
                "rating lookup failed"
            );
            persistence_error(&e)
        })?;

        row.map(Rating::from)
            .ok_or(DomainError::NotFound { entity: "rating", id })
    }
}
