//! Router-level tests against the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use stencil_api::{router, AppState};
use stencil_core::TemplateStore;
use stencil_store::MemoryTemplateStore;

fn app() -> Router {
    let store: Arc<dyn TemplateStore> = Arc::new(MemoryTemplateStore::new());
    router(AppState::new(store))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_list_render() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/templates",
            json!({ "name": "greeting", "body": "Hi {n}" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["template"]["name"], "greeting");
    assert_eq!(body["data"]["input_names"], json!(["n"]));

    let (status, body) = send(&app, get("/templates")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "greeting");

    let (status, body) = send(
        &app,
        post_json("/render/greeting", json!({ "values": { "n": "Ada" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rendered");
    assert_eq!(body["data"]["text"], "Hi Ada");
}

#[tokio::test]
async fn test_render_missing_inputs_is_a_200_diagnostic() {
    let app = app();
    send(
        &app,
        post_json(
            "/templates",
            json!({ "name": "letter", "body": "Dear {firstName} {lastName}," }),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            "/render/letter",
            json!({ "values": { "firstName": "John" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "missing_inputs");
    assert_eq!(body["data"]["missing"], json!(["lastName"]));
    assert_eq!(body["data"]["template"], "Dear {firstName} {lastName},");
    assert_eq!(
        body["data"]["known_inputs"],
        json!(["firstName", "lastName"])
    );
}

#[tokio::test]
async fn test_render_unknown_name_is_404() {
    let app = app();
    let (status, body) = send(&app, post_json("/render/nope", json!({ "values": {} }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_empty_body_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/templates", json!({ "name": "empty", "body": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_name_is_409() {
    let app = app();
    send(
        &app,
        post_json("/templates", json!({ "name": "greeting", "body": "Hi {n}" })),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            "/templates",
            json!({ "name": "greeting", "body": "Hello {n}" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_update_and_delete_round_trip() {
    let app = app();
    let (_, created) = send(
        &app,
        post_json("/templates", json!({ "name": "swap", "body": "{x}" })),
    )
    .await;
    let id = created["data"]["template"]["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/templates/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "body": "{y}" }).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["input_names"], json!(["y"]));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/templates/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, post_json("/render/swap", json!({ "values": {} }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
