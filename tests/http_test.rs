mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use payvault::interfaces::http::create_router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_router(Arc::new(common::harness().service))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let response = app().oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_crud_round_trip() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(post_json("/payments", json!({"id": "t-1", "amount": 1234})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "payment created"})
    );

    // Read, cache-sourced after the create's write-through
    let response = app.clone().oneshot(get("/payments/t-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": "t-1", "amount": 1234, "cache": true})
    );

    // List
    let response = app.clone().oneshot(get("/payments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"id": "t-1", "amount": 1234}])
    );

    // Update
    let response = app
        .clone()
        .oneshot(put_json("/payments/t-1", json!({"amount": 1334})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "updated"}));

    let response = app.clone().oneshot(get("/payments/t-1")).await.unwrap();
    assert_eq!(
        body_json(response).await,
        json!({"id": "t-1", "amount": 1334, "cache": true})
    );

    // Delete removes the record from the store
    let response = app.clone().oneshot(delete("/payments/t-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "deleted"}));

    let response = app.clone().oneshot(get("/payments")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));

    // ...but the cached copy is still served on the id read path.
    let response = app.clone().oneshot(get("/payments/t-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": "t-1", "amount": 1334, "cache": true})
    );
}

#[tokio::test]
async fn test_unknown_id_is_404_with_error_body() {
    let response = app().oneshot(get("/payments/missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let app = app();
    let payment = json!({"id": "t-dup", "amount": 5});

    let response = app
        .clone()
        .oneshot(post_json("/payments", payment.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/payments", payment))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_update_of_absent_id_succeeds() {
    let app = app();

    let response = app
        .clone()
        .oneshot(put_json("/payments/ghost", json!({"amount": 5})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "updated"}));

    // The unconditional cache write makes the ghost readable even though
    // the store update was a no-op.
    let response = app.clone().oneshot(get("/payments/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": "ghost", "amount": 5, "cache": true})
    );
}
