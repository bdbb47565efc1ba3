//! End-to-end grape lifecycle through the router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use grape_hub::api::{create_router, AppState};
use grape_hub::grapes::InMemoryGrapeStore;
use grape_hub::hub::GrapeHub;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::with_hub(Arc::new(InMemoryGrapeStore::new()), GrapeHub::new(8))
        .with_public_host("localhost:8080");
    create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/hateoas-grapes/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list() -> Request<Body> {
    Request::builder()
        .uri("/api/v1/hateoas-grapes/")
        .body(Body::empty())
        .unwrap()
}

fn delete(id: i32) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/hateoas-grapes/{id}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_list_delete_lifecycle() {
    let app = app();

    let (status, body) = send(&app, post(json!({"id": 0, "name": "Red"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "Grape created");

    let (status, _) = send(&app, post(json!({"id": 0, "name": "Green", "seedless": true}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, list()).await;
    assert_eq!(status, StatusCode::OK);
    let envelope: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        envelope["data"],
        json!([
            {"id": 1, "name": "Red"},
            {"id": 2, "name": "Green", "seedless": true},
        ])
    );
    assert_eq!(envelope["links"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, delete(1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");

    let (_, body) = send(&app, list()).await;
    let envelope: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(envelope["data"], json!([{"id": 2, "name": "Green", "seedless": true}]));
}

#[tokio::test]
async fn delete_of_missing_grape_is_opaque_failure() {
    let app = app();

    let (status, body) = send(&app, delete(99)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed");
}

#[tokio::test]
async fn duplicate_id_is_opaque_failure() {
    let app = app();

    let (status, _) = send(&app, post(json!({"id": 4, "name": "Red"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post(json!({"id": 4, "name": "Red"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Server error");
}

#[tokio::test]
async fn links_are_stable_across_empty_and_full_lists() {
    let app = app();

    let (_, empty) = send(&app, list()).await;
    send(&app, post(json!({"id": 0, "name": "Red"}))).await;
    let (_, full) = send(&app, list()).await;

    let empty: Value = serde_json::from_str(&empty).unwrap();
    let full: Value = serde_json::from_str(&full).unwrap();
    assert_eq!(empty["links"], full["links"]);
    assert_eq!(
        empty["links"][0],
        json!({
            "href": "localhost:8080/api/v1/hateoas-grapes/",
            "relation": "add_grape",
            "method": "POST"
        })
    );
}
