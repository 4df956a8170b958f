use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall::repositories::{MemoryStore, Repositories};
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_config::CorsConfig;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Router over an in-memory store. Clones share the store.
pub fn setup_test_app() -> Router {
    let state = AppState::new(
        Repositories::from_memory(MemoryStore::new()),
        CorsConfig::from_list("http://localhost:3000"),
    );
    init_router(state)
}

#[allow(dead_code)]
pub fn generate_unique_email(prefix: &str) -> String {
    format!("{}{}@gmail.com", prefix, Uuid::new_v4().simple())
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    send(app, request).await
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, body)
}

#[allow(dead_code)]
pub async fn register(app: &Router, teacher: &str, students: &[&str]) {
    let (status, _) = post_json(
        app,
        "/api/register",
        serde_json::json!({ "teacher": teacher, "students": students }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[allow(dead_code)]
pub fn sorted(value: &Value) -> Vec<String> {
    let mut emails: Vec<String> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    emails.sort();
    emails
}
