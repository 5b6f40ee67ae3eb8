//! Signup and login over HTTP.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use salesboard_integration_tests::TestContext;

#[tokio::test]
async fn test_signup_creates_user() {
    let ctx = TestContext::new();

    let resp = ctx
        .post_json(
            "/signup",
            &json!({ "username": "alice", "password": "password123" }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json(), json!({ "message": "User created successfully" }));
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let ctx = TestContext::new();
    let body = json!({ "username": "alice", "password": "password123" });

    ctx.post_json("/signup", &body).await;
    let resp = ctx.post_json("/signup", &body).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json(), json!({ "message": "User already exists" }));
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let ctx = TestContext::new();

    let no_password = ctx
        .post_json("/signup", &json!({ "username": "alice" }))
        .await;
    let no_username = ctx
        .post_json("/signup", &json!({ "password": "password123" }))
        .await;

    assert_eq!(no_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_username.status, StatusCode::BAD_REQUEST);
    assert!(no_password.json()["message"].is_string());
}

#[tokio::test]
async fn test_signup_invalid_fields() {
    let ctx = TestContext::new();

    let blank_name = ctx
        .post_json(
            "/signup",
            &json!({ "username": "   ", "password": "password123" }),
        )
        .await;
    let short_password = ctx
        .post_json("/signup", &json!({ "username": "bob", "password": "short" }))
        .await;

    assert_eq!(blank_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_non_json_body() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("username=alice"))
        .unwrap();

    let resp = ctx.send(request).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token() {
    let ctx = TestContext::new();
    let body = json!({ "username": "alice", "password": "password123" });
    ctx.post_json("/signup", &body).await;

    let resp = ctx.post_json("/login", &body).await;

    assert_eq!(resp.status, StatusCode::OK);
    let token = resp.json()["token"].as_str().unwrap().to_owned();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new();
    ctx.post_json(
        "/signup",
        &json!({ "username": "alice", "password": "password123" }),
    )
    .await;

    let resp = ctx
        .post_json(
            "/login",
            &json!({ "username": "alice", "password": "wrong-password" }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json(), json!({ "message": "Invalid credentials" }));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let ctx = TestContext::new();

    let resp = ctx
        .post_json(
            "/login",
            &json!({ "username": "nobody", "password": "password123" }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json(), json!({ "message": "Invalid credentials" }));
}
