//! Routes for products and their ratings.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use catalog_core::repository::{Product, Rating};
use catalog_products::application::product_service::ProductService;
use catalog_products::domain::views::ProductWithRatings;
use serde_json::Value;

use crate::context::Ctx;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/products
async fn list_products(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> Result<Json<Vec<Product>>, ApiError> {
    let service = ProductService::new(ctx, state.ports());
    Ok(Json(service.list_all_products().await?))
}

/// GET /api/v1/products/{id}
async fn get_product(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<i64>,
) -> Result<Json<ProductWithRatings>, ApiError> {
    let service = ProductService::new(ctx, state.ports());
    Ok(Json(service.get_product_with_ratings(id).await?))
}

/// POST /api/v1/products/{id}/ratings
///
/// The body is `{"rating": 1..=5, "review": "..."}`; the product comes from
/// the path. Fields are type-checked during validation rather than by the
/// extractor, so a mistyped field is reported with every other violation.
async fn add_rating(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let Json(body) = body?;
    let service = ProductService::new(ctx, state.ports());
    let rating = service.submit_rating_body(id, &body).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// Returns the router for product endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}/ratings", post(add_rating))
}
