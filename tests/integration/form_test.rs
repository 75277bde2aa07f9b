//! Integration tests for form schema endpoints.

use axum::http::StatusCode;
use serde_json::json;

use noticeflow_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_get_builtin_form() {
    let app = TestApp::new().await;
    let (_, token) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let response = app
        .request("GET", "/forms/CREATE_NOTIFIED_PERSON", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["stepKey"], "CREATE_NOTIFIED_PERSON");
    let fields = response.body["data"]["fields"].as_array().unwrap();
    assert_eq!(fields[0]["id"], "name");
    assert_eq!(fields.len(), 8);
}

#[tokio::test]
async fn test_unknown_form_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let response = app
        .request("GET", "/forms/NO_SUCH_STEP", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forms_require_auth() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/forms/CREATE_NOTIFICATION", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_validate_submission() {
    let app = TestApp::new().await;
    let (_, token) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let response = app
        .request(
            "POST",
            "/forms/VALIDATE_NOTIFICATION/validate",
            Some(json!({ "needsAdditionalInfo": true })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/forms/VALIDATE_NOTIFICATION/validate",
            Some(json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), "validation");
}
