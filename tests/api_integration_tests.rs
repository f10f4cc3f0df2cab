//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::collections::HashSet;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use student_api::{api::create_router, AppState, StudentStore};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let store = StudentStore::open_in_memory().unwrap();
    create_router(AppState::new(store))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn post_student(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/students")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_student(r#"{"name":"Ada","age":30,"grade":"A"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_to_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.parse::<u64>().is_ok(), "id should be a decimal integer: {}", id);
    assert_eq!(
        created,
        json!({"id": id, "name": "Ada", "age": 30, "grade": "A"})
    );

    let response = app.oneshot(get(&format!("/students/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, created);
}

#[tokio::test]
async fn test_create_replaces_client_id() {
    let app = create_test_app();

    let response = app
        .oneshot(post_student(
            r#"{"id":"client-id","name":"Ada","age":30,"grade":"A"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_to_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap();
    assert_ne!(id, "client-id");
    assert!(id.parse::<u64>().is_ok());
}

#[tokio::test]
async fn test_create_partial_body_uses_zero_values() {
    let app = create_test_app();

    let response = app.oneshot(post_student(r#"{"name":"Bo"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_to_json(response.into_body()).await;
    assert_eq!(created["name"], "Bo");
    assert_eq!(created["age"], 0);
    assert_eq!(created["grade"], "");
}

#[tokio::test]
async fn test_create_without_content_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/students")
                .body(Body::from(r#"{"name":"Cy","age":12,"grade":"F"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// == Error Response Tests ==

#[tokio::test]
async fn test_create_malformed_json() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_student(r#"{"name": "Ada", "age": }"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().is_some());

    // Nothing was written
    let response = app.oneshot(get("/students")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_create_wrong_field_type() {
    let app = create_test_app();

    let response = app
        .oneshot(post_student(r#"{"name":"Ada","age":"thirty"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_not_found_body() {
    let app = create_test_app();

    let response = app.oneshot(get("/students/doesnotexist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = body_to_bytes(response.into_body()).await;
    assert_eq!(bytes, br#"{"error":"Student not found"}"#.to_vec());
}

#[tokio::test]
async fn test_get_corrupt_record_is_500_with_empty_body() {
    let store = StudentStore::open_in_memory().unwrap();
    store.put("99", b"garbage").unwrap();
    let app = create_router(AppState::new(store));

    let response = app.oneshot(get("/students/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_to_bytes(response.into_body()).await.is_empty());
}

// == List Endpoint Tests ==

#[tokio::test]
async fn test_list_empty_store() {
    let app = create_test_app();

    let response = app.oneshot(get("/students")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_list_returns_all_created() {
    let app = create_test_app();

    let mut created_ids = HashSet::new();
    for (name, age) in [("Ada", 30), ("Bo", 19), ("Cy", 12), ("Di", 45)] {
        let body = json!({"name": name, "age": age, "grade": "B"}).to_string();
        let response = app.clone().oneshot(post_student(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let created = body_to_json(response.into_body()).await;
        created_ids.insert(created["id"].as_str().unwrap().to_string());
    }
    assert_eq!(created_ids.len(), 4);

    let response = app.oneshot(get("/students")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_to_json(response.into_body()).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 4);

    let listed_ids: HashSet<String> = listed
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed_ids, created_ids);

    // Key order
    let ordered: Vec<&str> = listed.iter().map(|s| s["id"].as_str().unwrap()).collect();
    let mut sorted = ordered.clone();
    sorted.sort();
    assert_eq!(ordered, sorted);
}

#[tokio::test]
async fn test_list_skips_undecodable_records() {
    let store = StudentStore::open_in_memory().unwrap();
    store.put("0", b"{broken").unwrap();
    store
        .put("1", br#"{"id":"1","name":"Ada","age":30,"grade":"A"}"#)
        .unwrap();
    let app = create_router(AppState::new(store));

    let response = app.oneshot(get("/students")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response.into_body()).await,
        json!([{"id": "1", "name": "Ada", "age": 30, "grade": "A"}])
    );
}

// == Persistence Tests ==

#[tokio::test]
async fn test_records_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("student-info.db");

    let store = StudentStore::open(&path, Duration::from_secs(1)).unwrap();
    let app = create_router(AppState::new(store));
    let response = app
        .oneshot(post_student(r#"{"name":"Ada","age":30,"grade":"A"}"#))
        .await
        .unwrap();
    let created = body_to_json(response.into_body()).await;

    // The router owned the only handle; dropping it closed the file.
    let store = StudentStore::open(&path, Duration::from_secs(1)).unwrap();
    let app = create_router(AppState::new(store));
    let uri = format!("/students/{}", created["id"].as_str().unwrap());
    let response = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, created);
}
