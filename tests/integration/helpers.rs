//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use noticeflow_core::config::AppConfig;
use noticeflow_core::config::database::DatabaseProvider;
use noticeflow_database::store::Stores;
use noticeflow_entity::user::UserRole;
use noticeflow_service::{FormService, UserService};

/// Password shared by every test user.
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct setup
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// App with the permissive workflow
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// App that enforces status preconditions on review
    pub async fn strict() -> Self {
        Self::build(true).await
    }

    async fn build(enforce_transitions: bool) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.workflow.enforce_transitions = enforce_transitions;

        let stores = Stores::memory();
        FormService::new(Arc::clone(&stores.forms))
            .seed_builtin()
            .await
            .expect("Failed to seed forms");

        let router = noticeflow_api::build_app(config.clone(), stores.clone());

        Self {
            router,
            stores,
            config,
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, email: &str, role: UserRole) -> Uuid {
        UserService::new(Arc::clone(&self.stores.users))
            .create_user("Test User", email, PASSWORD, role)
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Sign in and return the access token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/signin",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );

        response.body["data"]["accessToken"]
            .as_str()
            .expect("No accessToken in sign-in response")
            .to_string()
    }

    /// Create a user of `role` and sign them in
    pub async fn user_token(&self, email: &str, role: UserRole) -> (Uuid, String) {
        let id = self.create_test_user(email, role).await;
        (id, self.login(email).await)
    }

    /// Create a notification and return its ID
    pub async fn create_notification(&self, token: &str, title: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/notifications",
                Some(json!({
                    "title": title,
                    "description": "Audiência de conciliação marcada",
                    "hearingDate": "2026-11-20",
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No id in create response")
    }

    /// Attach a valid person, submitting the notification for validation
    pub async fn attach_person(&self, token: &str, notification_id: Uuid) -> TestResponse {
        self.request(
            "POST",
            "/notifications/person",
            Some(json!({
                "notificationId": notification_id,
                "name": "João Souza",
                "email": "joao@example.com",
                "phone": "(11) 98765-4321",
                "cep": "01310-100",
                "state": "SP",
                "city": "São Paulo",
                "neighborhood": "Bela Vista",
                "street": "Avenida Paulista",
            })),
            Some(token),
        )
        .await
    }

    /// Send a review action
    pub async fn review(&self, token: &str, notification_id: Uuid, action: &str) -> TestResponse {
        self.request(
            "POST",
            "/notifications/review",
            Some(json!({ "notificationId": notification_id, "action": action })),
            Some(token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` kind of a failure envelope
    pub fn error_kind(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
