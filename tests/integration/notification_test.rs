//! Integration tests for the notification lifecycle.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use noticeflow_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_full_review_cycle() {
    let app = TestApp::new().await;
    let (author, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (reviewer_id, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0001").await;

    let response = app
        .request("GET", &format!("/notifications/{id}"), None, Some(&notifier))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "in_progress");
    assert_eq!(response.body["data"]["authorId"], author.to_string());
    assert_eq!(response.body["data"]["hasNotifiedPerson"], false);
    assert_eq!(response.body["data"]["availableActions"], json!([]));

    let response = app.attach_person(&notifier, id).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["phone"], "11987654321");
    assert_eq!(response.body["data"]["cep"], "01310100");

    let response = app
        .request("GET", &format!("/notifications/{id}"), None, Some(&reviewer))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "validation");
    assert_eq!(response.body["data"]["hasNotifiedPerson"], true);
    assert_eq!(
        response.body["data"]["availableActions"],
        json!(["back", "approve"])
    );

    let response = app.review(&reviewer, id, "back").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "in_progress");
    assert_eq!(response.body["data"]["reviewerId"], reviewer_id.to_string());
    assert_eq!(response.body["data"]["hasNotifiedPerson"], true);
    assert_eq!(response.body["data"]["availableActions"], json!([]));

    let response = app
        .request("GET", &format!("/notifications/{id}"), None, Some(&reviewer))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/notifications/{id}"), None, Some(&notifier))
        .await;
    assert_eq!(
        response.body["data"]["availableActions"],
        json!(["validate"])
    );

    let response = app.review(&notifier, id, "validate").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "validation");

    let response = app.review(&reviewer, id, "approve").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_reviewer_cannot_create() {
    let app = TestApp::new().await;
    let (_, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let response = app
        .request(
            "POST",
            "/notifications",
            Some(json!({
                "title": "Audiência 0002",
                "description": "Audiência de instrução e julgamento",
                "hearingDate": "2026-11-20",
            })),
            Some(&reviewer),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_reports_one_validation_message() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let response = app
        .request(
            "POST",
            "/notifications",
            Some(json!({
                "title": "Au",
                "description": "short",
                "hearingDate": "2026-11-20",
            })),
            Some(&notifier),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), "validation");
    assert_eq!(
        response.body["message"],
        "Description must be between 10 and 1000 characters"
    );

    let response = app
        .request(
            "POST",
            "/notifications",
            Some(json!({
                "title": "Audiência 0003",
                "description": "Audiência de conciliação",
                "hearingDate": "next tuesday",
            })),
            Some(&notifier),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_title_conflicts() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    app.create_notification(&notifier, "Audiência 0004").await;
    let response = app
        .request(
            "POST",
            "/notifications",
            Some(json!({
                "title": "Audiência 0004",
                "description": "Audiência de conciliação",
                "hearingDate": "2026-11-20",
            })),
            Some(&notifier),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_kind(), "conflict");
}

#[tokio::test]
async fn test_listing_is_scoped_by_role() {
    let app = TestApp::new().await;
    let (_, ana) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (_, bruno) = app
        .user_token("bruno@example.com", UserRole::Notifier)
        .await;
    let (_, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let submitted = app.create_notification(&ana, "Audiência 0005").await;
    app.create_notification(&ana, "Audiência 0006").await;
    app.create_notification(&bruno, "Audiência 0007").await;
    app.attach_person(&ana, submitted).await;

    let response = app
        .request("GET", "/notifications", None, Some(&ana))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["meta"]["totalItems"], 2);

    let response = app
        .request("GET", "/notifications", None, Some(&reviewer))
        .await;
    assert_eq!(response.body["meta"]["totalItems"], 1);
    assert_eq!(response.body["data"][0]["id"], submitted.to_string());

    let response = app
        .request("GET", "/notifications?page=2", None, Some(&ana))
        .await;
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new().await;
    let (_, ana) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    app.create_notification(&ana, "Audiência 0015").await;

    let response = app
        .request(
            "GET",
            &format!("/notifications?page={}", u64::MAX),
            None,
            Some(&ana),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(response.body["meta"]["totalItems"], 1);
}

#[tokio::test]
async fn test_out_of_projection_reads_are_not_found() {
    let app = TestApp::new().await;
    let (_, ana) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (_, bruno) = app
        .user_token("bruno@example.com", UserRole::Notifier)
        .await;
    let (_, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let id = app.create_notification(&ana, "Audiência 0008").await;

    for token in [&bruno, &reviewer] {
        let response = app
            .request("GET", &format!("/notifications/{id}"), None, Some(token))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    let response = app
        .request(
            "GET",
            &format!("/notifications/{}", Uuid::new_v4()),
            None,
            Some(&ana),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/notifications/not-a-uuid", None, Some(&ana))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edits_blocked_during_validation() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0009").await;

    let response = app
        .request(
            "PUT",
            "/notifications",
            Some(json!({ "notificationId": id, "title": "Audiência 0009-A" })),
            Some(&notifier),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Audiência 0009-A");

    app.attach_person(&notifier, id).await;

    let response = app
        .request(
            "PUT",
            "/notifications",
            Some(json!({ "notificationId": id, "title": "Audiência 0009-B" })),
            Some(&notifier),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            "/notifications/person",
            Some(json!({ "notificationId": id, "city": "Campinas" })),
            Some(&notifier),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_second_person_conflicts() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0010").await;
    assert_eq!(app.attach_person(&notifier, id).await.status, StatusCode::CREATED);

    let response = app.attach_person(&notifier, id).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_review_role_checks() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0011").await;
    app.attach_person(&notifier, id).await;

    let response = app.review(&notifier, id, "approve").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.review(&notifier, id, "archive").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.review(&notifier, Uuid::new_v4(), "validate").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_permissive_workflow_applies_from_any_status() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (_, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0012").await;

    let response = app.review(&reviewer, id, "approve").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_strict_workflow_rejects_illegal_transitions() {
    let app = TestApp::strict().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (_, reviewer) = app
        .user_token("carla@example.com", UserRole::Reviewer)
        .await;

    let id = app.create_notification(&notifier, "Audiência 0013").await;

    let response = app.review(&reviewer, id, "approve").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_kind(), "invalid_transition");

    let response = app.review(&notifier, id, "validate").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_kind(), "invalid_transition");

    app.attach_person(&notifier, id).await;
    let response = app.review(&reviewer, id, "approve").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.review(&reviewer, id, "back").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_kind(), "invalid_transition");
}

#[tokio::test]
async fn test_admin_can_do_everything_a_reviewer_can() {
    let app = TestApp::new().await;
    let (_, notifier) = app
        .user_token("ana@example.com", UserRole::Notifier)
        .await;
    let (_, admin) = app.user_token("root@example.com", UserRole::Admin).await;

    let id = app.create_notification(&notifier, "Audiência 0014").await;
    app.attach_person(&notifier, id).await;

    let response = app
        .request("GET", &format!("/notifications/{id}"), None, Some(&admin))
        .await;
    assert_eq!(
        response.body["data"]["availableActions"],
        json!(["back", "approve"])
    );

    let response = app.review(&admin, id, "approve").await;
    assert_eq!(response.status, StatusCode::OK);
}
