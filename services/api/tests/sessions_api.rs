//! Integration tests for the session registry HTTP surface
//!
//! These drive the router in-process, one request at a time, the same way
//! the service handles them behind the listener.

use api::{AppState, create_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(body: Value) -> Request<Body> {
    Request::post("/sessions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_sessions() -> Request<Body> {
    Request::get("/sessions").body(Body::empty()).expect("request")
}

fn delete(query: &str) -> Request<Body> {
    Request::delete(format!("/sessions{query}"))
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn test_create_list_delete_scenario() {
    let app = create_router(AppState::new());

    let response = send(&app, post_json(json!({"type": "work", "duration": 25}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({"id": 1, "type": "work", "duration": 1_500_000, "status": "active"})
    );

    let response = send(&app, post_json(json!({"type": "break", "duration": 5}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({"id": 2, "type": "break", "duration": 300_000, "status": "active"})
    );

    let response = send(&app, get_sessions()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[1]["id"], 2);

    let response = send(&app, delete("?id=1")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let response = send(&app, get_sessions()).await;
    assert_eq!(
        body_json(response).await,
        json!([{"id": 2, "type": "break", "duration": 300_000, "status": "active"}])
    );
}

#[tokio::test]
async fn test_create_without_body_uses_defaults() {
    let app = create_router(AppState::new());

    let request = Request::post("/sessions").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({"id": 1, "type": "work", "duration": 1_500_000, "status": "active"})
    );
}

#[tokio::test]
async fn test_list_is_empty_on_fresh_registry() {
    let app = create_router(AppState::new());

    let response = send(&app, get_sessions()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_returns_records_in_creation_order() {
    let app = create_router(AppState::new());

    for minutes in 1..=4 {
        let response = send(&app, post_json(json!({"duration": minutes}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = body_json(send(&app, get_sessions()).await).await;
    let durations: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["duration"].as_u64().unwrap())
        .collect();
    assert_eq!(durations, vec![60_000, 120_000, 180_000, 240_000]);
}

#[tokio::test]
async fn test_delete_unknown_id_still_returns_no_content() {
    let app = create_router(AppState::new());
    send(&app, post_json(json!({}))).await;

    let response = send(&app, delete("?id=99")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = body_json(send(&app, get_sessions()).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_negative_id_is_a_no_op() {
    let app = create_router(AppState::new());
    send(&app, post_json(json!({}))).await;

    let response = send(&app, delete("?id=-1")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = body_json(send(&app, get_sessions()).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_requires_an_integer_id() {
    let app = create_router(AppState::new());

    let response = send(&app, delete("")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing session id");

    let response = send(&app, delete("?id=abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid session id 'abc'");
}

#[tokio::test]
async fn test_invalid_duration_is_rejected() {
    let app = create_router(AppState::new());

    let response = send(&app, post_json(json!({"duration": "soon"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(
        error["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid duration \"soon\"")
    );

    // Nothing was stored and the counter did not move
    let response = send(&app, post_json(json!({"duration": 1}))).await;
    assert_eq!(body_json(response).await["id"], 1);
}

#[tokio::test]
async fn test_unknown_type_is_rejected() {
    let app = create_router(AppState::new());

    let response = send(&app, post_json(json!({"type": "nap"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_array_body_is_rejected() {
    let app = create_router(AppState::new());

    let response = send(&app, post_json(json!(["break", 5]))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(send(&app, get_sessions()).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_head_is_not_allowed() {
    let app = create_router(AppState::new());

    let request = Request::head("/sessions").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "POST, GET, DELETE"
    );
}

#[tokio::test]
async fn test_unsupported_method_is_not_allowed() {
    let app = create_router(AppState::new());

    for method in ["PUT", "PATCH", "OPTIONS"] {
        let request = Request::builder()
            .method(method)
            .uri("/sessions")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            "POST, GET, DELETE"
        );
        assert_eq!(
            body_json(response).await["error"],
            format!("Method {method} Not Allowed")
        );
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_router(AppState::new());

    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}
