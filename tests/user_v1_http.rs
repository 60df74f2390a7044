//! End-to-end calls through the HTTP router with in-memory storage.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service::application::UserService;
use auth_service::interfaces::http::modules::health::HealthState;
use auth_service::{create_api_router, InMemoryUserRepository, UserV1Handler};

fn app() -> Router {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UserService::new(repo));
    let handler = Arc::new(UserV1Handler::new(service));
    create_api_router(handler, HealthState::new(None), None)
}

async fn call(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ada() -> Value {
    json!({
        "info": {
            "name": "Ada",
            "email": "ada@example.com",
            "password": "x",
            "password_confirm": "x",
            "role": "USER"
        }
    })
}

#[tokio::test]
async fn create_then_get() {
    let app = app();

    let (status, body) = call(&app, "/user_v1.UserV1/Create", ada()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1 }));

    let (status, body) = call(&app, "/user_v1.UserV1/Get", json!({ "id": 1 })).await;
    assert_eq!(status, StatusCode::OK);

    let user = &body["user"];
    assert_eq!(user["id"], 1);
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "USER");
    assert!(user["created_at"]["seconds"].is_i64());
    assert!(user.get("updated_at").is_none());
}

#[tokio::test]
async fn identifiers_increase_per_create() {
    let app = app();

    let (_, first) = call(&app, "/user_v1.UserV1/Create", ada()).await;
    let (_, second) = call(&app, "/user_v1.UserV1/Create", ada()).await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn create_without_info_is_bad_request() {
    let (status, body) = call(&app(), "/user_v1.UserV1/Create", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let (status, body) = call(&app(), "/user_v1.UserV1/Get", json!({ "id": 42 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_and_delete_require_an_id() {
    let app = app();

    let (status, body) = call(&app, "/user_v1.UserV1/Update", json!({ "id": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User ID is required");

    let (status, body) = call(&app, "/user_v1.UserV1/Delete", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (status, body) = call(&app, "/user_v1.UserV1/Delete", json!({ "id": 7 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn health_reports_memory_backend() {
    let resp = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}
