//! Integration tests for authentication flow.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use noticeflow_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::new().await;
    app.create_test_user("ana@example.com", UserRole::Notifier)
        .await;

    let response = app
        .request(
            "POST",
            "/auth/signin",
            Some(json!({ "email": "ana@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["data"]["accessToken"].is_string());
    assert_eq!(response.body["data"]["user"]["role"], "notifier");

    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with(&format!("{}=", app.config.auth.cookie_name)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::new().await;
    app.create_test_user("bruno@example.com", UserRole::Notifier)
        .await;

    let response = app
        .request(
            "POST",
            "/auth/signin",
            Some(json!({ "email": "bruno@example.com", "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.error_kind(), "unauthorized");
}

#[tokio::test]
async fn test_sign_in_unknown_user_same_error() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/signin",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_sign_in_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/signin",
            Some(json!({ "email": "not-an-email", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Email must be a valid email");
}

#[tokio::test]
async fn test_me_with_bearer() {
    let app = TestApp::new().await;
    let (id, token) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], id.to_string());
    assert_eq!(response.body["data"]["role"], "reviewer");
}

#[tokio::test]
async fn test_me_with_cookie() {
    let app = TestApp::new().await;
    let (_, token) = app.user_token("dora@example.com", UserRole::Admin).await;

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(
            header::COOKIE,
            format!("{}={}", app.config.auth.cookie_name, token),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "dora@example.com");
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/auth/me", None, Some("garbage.token.value"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let (_, token) = app.user_token("eva@example.com", UserRole::Notifier).await;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(
            header::COOKIE,
            format!("{}={}", app.config.auth.cookie_name, token),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with(&format!("{}=", app.config.auth.cookie_name)));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
