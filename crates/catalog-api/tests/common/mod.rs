//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_core::queue::NotificationQueue;
use catalog_core::repository::{Product, ProductRepository, Rating, RatingRepository};
use catalog_test_support::{
    FixedClock, InMemoryProductRepository, InMemoryRatingRepository, RecordingNotificationQueue,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_api::state::AppState;

/// An app wired to in-memory collaborators that tests can inspect.
pub struct TestApp {
    pub products: Arc<InMemoryProductRepository>,
    pub ratings: Arc<InMemoryRatingRepository>,
    pub queue: Arc<RecordingNotificationQueue>,
}

impl TestApp {
    /// Seed the app with `products` and `ratings`.
    pub fn new(products: Vec<Product>, ratings: Vec<Rating>) -> Self {
        Self {
            products: Arc::new(InMemoryProductRepository::new(products)),
            ratings: Arc::new(InMemoryRatingRepository::with_ratings(
                FixedClock::standard(),
                ratings,
            )),
            queue: Arc::new(RecordingNotificationQueue::new()),
        }
    }

    /// Build the full router over this app's collaborators.
    pub fn router(&self) -> Router {
        build_app(
            self.products.clone(),
            self.ratings.clone(),
            self.queue.clone(),
        )
    }
}

/// Build the full app router over arbitrary collaborators with a fixed clock.
pub fn build_app(
    products: Arc<dyn ProductRepository>,
    ratings: Arc<dyn RatingRepository>,
    queue: Arc<dyn NotificationQueue>,
) -> Router {
    let state = AppState::new(products, ratings, queue, Arc::new(FixedClock::standard()));
    catalog_api::app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
