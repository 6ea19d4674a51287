//! `PostgreSQL` implementation of the `ProductRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::repository::{Product, ProductRepository};

use crate::persistence_error;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price_cents: i64,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed product repository.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new `PgProductRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price_cents, created_at FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %ctx.correlation_id,
                error = %e,
                "product listing failed"
            );
            persistence_error(&e)
        })?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Product, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price_cents, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %ctx.correlation_id,
                error = %e,
                "product lookup failed"
            );
            persistence_error(&e)
        })?;

        row.map(Product::from).ok_or(DomainError::NotFound {
            entity: "product",
            id,
        })
    }
}
