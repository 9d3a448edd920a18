//! Handler tests for the social domain
//!
//! These tests drive the operation router directly:
//! - Request bodies (raw JSON → bound parameters)
//! - Response envelopes (wrapped vs. unwrapped)
//! - HTTP status codes and JSON error bodies
//!
//! The store is the in-process one, wrapped in a counter so tests can prove
//! rejected requests never reach it.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_social::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

/// Store wrapper counting every call that reaches it
#[derive(Default)]
struct CountingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
}

#[async_trait]
impl StoreClient for CountingStore {
    async fn execute(&self, operation: &str, params: &BoundParameters) -> GatewayResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(operation, params).await
    }

    async fn ping(&self) -> GatewayResult<()> {
        self.inner.ping().await
    }
}

fn app() -> (axum::Router, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let service = SocialService::new(store.clone(), Duration::from_secs(5));
    (handlers::router(service), store)
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_wrapped_user() {
    let (app, store) = app();
    let builder = TestDataBuilder::from_test_name("handler_create_user");

    let request = post(
        "/createUser",
        json!({
            "name": builder.user_name("Alice"),
            "age": builder.age(),
            "email": builder.email("alice")
        })
        .to_string(),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = json_body(response.into_body()).await;
    let list = body.as_array().expect("createUser is wrapped");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["user"]["name"], builder.user_name("Alice"));
    assert_eq!(list[0]["user"]["age"], builder.age());
    assert!(list[0]["user"]["id"].is_string());
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_users_without_body_is_wrapped_list() {
    let (app, _) = app();

    let response = app
        .oneshot(Request::post("/getUsers").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!([{ "users": [] }]));
}

#[tokio::test]
async fn test_null_body_counts_as_no_body() {
    for uri in ["/getUsers", "/getPosts"] {
        let (app, store) = app();

        let response = app.oneshot(post(uri, "null")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert!(json_body(response.into_body()).await.is_array());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_get_following_is_not_wrapped() {
    let (app, _) = app();

    let response = app
        .oneshot(post("/getFollowing", json!({ "user_id": "nobody" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!({ "following": [] }));
}

#[tokio::test]
async fn test_malformed_json_is_400_and_store_untouched() {
    for op in CATALOG {
        let (app, store) = app();

        let response = app
            .oneshot(post(&op.path(), "{\"name\": \"Alice\""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", op.name);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_JSON");
        assert_eq!(store.calls.load(Ordering::SeqCst), 0, "{}", op.name);
    }
}

#[tokio::test]
async fn test_wrong_method_is_405_and_store_untouched() {
    for op in CATALOG {
        for method in ["GET", "PUT", "DELETE"] {
            let (app, store) = app();

            let request = Request::builder()
                .method(method)
                .uri(op.path())
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {}",
                method,
                op.name
            );
            let body = json_body(response.into_body()).await;
            assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
            assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        }
    }
}

#[tokio::test]
async fn test_schema_violation_is_400_with_parameter_details() {
    let (app, store) = app();

    let response = app
        .oneshot(post(
            "/createUser",
            json!({ "name": "Alice", "age": 4294967296u64, "email": "a@x" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_INPUT");
    assert_eq!(body["details"]["parameter"], "age");
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_parameter_is_400() {
    let (app, _) = app();

    let response = app
        .oneshot(post(
            "/getFollowers",
            json!({ "user_id": "u1", "limit": 10 }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["details"]["parameter"], "limit");
}

#[tokio::test]
async fn test_store_error_is_500_with_message() {
    let (app, store) = app();
    let ghost = TestDataBuilder::from_test_name("handler_store_error").id("ghost");

    let response = app
        .oneshot(post(
            "/createPost",
            json!({ "user_id": ghost, "content": "hello" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "STORE_EXECUTION");
    assert_eq!(body["message"], format!("User node not found: {}", ghost));
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_path_is_not_routed() {
    let (app, _) = app();

    let response = app
        .oneshot(post("/dropDatabase", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
