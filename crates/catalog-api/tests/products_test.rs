//! Integration tests for the product and rating endpoints.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_test_support::{
    FailingNotificationQueue, FailingProductRepository, FailingRatingRepository, FixedClock,
    InMemoryProductRepository, InMemoryRatingRepository, RecordingNotificationQueue, product,
    rating,
};
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_list_products_returns_repository_order() {
    let app = common::TestApp::new(
        vec![product(2, "Teapot"), product(1, "Mug"), product(3, "Kettle")],
        vec![],
    );

    let (status, json) = common::get_json(app.router(), "/api/v1/products").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Teapot", "Mug", "Kettle"]);
    assert_eq!(app.products.get_all_calls(), 1);
}

#[tokio::test]
async fn test_list_products_persistence_failure_returns_500() {
    let app = common::build_app(
        Arc::new(FailingProductRepository),
        Arc::new(FailingRatingRepository::new()),
        Arc::new(RecordingNotificationQueue::new()),
    );

    let (status, json) = common::get_json(app, "/api/v1/products").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "persistence_error");
}

#[tokio::test]
async fn test_get_product_includes_ratings_in_order() {
    let app = common::TestApp::new(
        vec![product(7, "Grinder")],
        vec![
            rating(1, 7, 5, "Excellent"),
            rating(2, 9, 1, "Wrong product"),
            rating(3, 7, 3, "Average"),
        ],
    );

    let (status, json) = common::get_json(app.router(), "/api/v1/products/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Grinder");
    let reviews: Vec<&str> = json["ratings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["review"].as_str().unwrap())
        .collect();
    assert_eq!(reviews, vec!["Excellent", "Average"]);
}

#[tokio::test]
async fn test_get_missing_product_returns_404_without_rating_lookup() {
    let app = common::TestApp::new(vec![product(7, "Grinder")], vec![]);

    let (status, json) = common::get_json(app.router(), "/api/v1/products/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert!(app.ratings.get_all_by_product_id_calls().is_empty());
}

#[tokio::test]
async fn test_get_product_with_non_positive_id_returns_400() {
    let app = common::TestApp::new(vec![], vec![]);

    let (status, json) = common::get_json(app.router(), "/api/v1/products/0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["violations"][0]["field"], "id");
    assert!(app.products.find_by_id_calls().is_empty());
}

#[tokio::test]
async fn test_add_rating_returns_201_and_publishes_event() {
    let app = common::TestApp::new(vec![product(1, "Mug")], vec![]);

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/products/1/ratings",
        &serde_json::json!({ "rating": 5, "review": "Great product" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], 1);
    assert_eq!(json["product_id"], 1);
    assert_eq!(json["rating"], 5);
    assert_eq!(json["review"], "Great product");
    assert!(json["created_at"].is_string());

    let saved = app.queue.saved_messages();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].event_name, "product-rating:added");
    assert_eq!(saved[0].payload["product_id"], 1);
    assert_eq!(saved[0].payload["rating"], json);
}

#[tokio::test]
async fn test_add_rating_uses_correlation_id_header() {
    let app = common::TestApp::new(vec![product(1, "Mug")], vec![]);
    let correlation_id = Uuid::new_v4();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/products/1/ratings")
        .header("content-type", "application/json")
        .header("x-correlation-id", correlation_id.to_string())
        .body(Body::from(r#"{"rating": 4, "review": "Solid"}"#))
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.ratings.create_contexts()[0].correlation_id, correlation_id);
    assert_eq!(app.queue.saved_messages()[0].correlation_id, correlation_id);
}

#[tokio::test]
async fn test_add_rating_reports_every_violation_and_persists_nothing() {
    let app = common::TestApp::new(vec![product(1, "Mug")], vec![]);

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/products/1/ratings",
        &serde_json::json!({ "rating": 11 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    let fields: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["rating", "review"]);
    assert!(app.ratings.create_calls().is_empty());
    assert!(app.queue.saved_messages().is_empty());
}

#[tokio::test]
async fn test_add_rating_publication_failure_returns_502() {
    let products = Arc::new(InMemoryProductRepository::new(vec![product(1, "Mug")]));
    let ratings = Arc::new(InMemoryRatingRepository::new(FixedClock::standard()));
    let queue = Arc::new(FailingNotificationQueue::new());
    let app = common::build_app(products, ratings.clone(), queue.clone());

    let (status, json) = common::post_json(
        app,
        "/api/v1/products/1/ratings",
        &serde_json::json!({ "rating": 5, "review": "Great product" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "publication_error");
    assert_eq!(queue.attempts(), 1);
    assert_eq!(ratings.create_calls().len(), 1);
}

#[tokio::test]
async fn test_add_rating_mistyped_fields_are_all_reported() {
    let app = common::TestApp::new(vec![product(1, "Mug")], vec![]);

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/products/1/ratings",
        &serde_json::json!({ "rating": "five", "review": 7 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    let fields: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["rating", "review"]);
    assert!(app.ratings.create_calls().is_empty());
    assert!(app.queue.saved_messages().is_empty());
}

#[tokio::test]
async fn test_add_rating_malformed_json_returns_400() {
    let app = common::TestApp::new(vec![product(1, "Mug")], vec![]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/products/1/ratings")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"rating": 4,"#))
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.ratings.create_calls().is_empty());
}
