//! HTTP transport for the review presenter.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use noticeflow_api::dto::response::{NotificationResponse, UserResponse};
use noticeflow_core::error::AppError;
use noticeflow_core::result::AppResult;
use noticeflow_entity::notification::ReviewAction;
use noticeflow_service::{NotificationSnapshot, TransitionClient};

/// Success envelope as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

/// Error envelope as returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    error: String,
}

/// Talks to a running NoticeFlow server with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransitionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpTransitionClient {
    /// Creates a client for `base_url`, e.g. `http://localhost:3333`.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// The signed-in user.
    pub async fn me(&self) -> AppResult<UserResponse> {
        let request = self.http.get(self.url("/auth/me"));
        self.send(request).await
    }

    /// Full notification as the server presents it to this user.
    pub async fn notification(&self, id: Uuid) -> AppResult<NotificationResponse> {
        let request = self.http.get(self.url(&format!("/notifications/{id}")));
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> AppResult<T> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::service_unavailable(format!("Request failed: {e}")))?;

        let status = response.status();
        debug!(url = %response.url(), status = %status, "API response");
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(error_from_response(status, &body.error, &body.message));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Invalid response body: {e}")))?;
        envelope
            .data
            .ok_or_else(|| AppError::internal("Response carried no data"))
    }
}

#[async_trait]
impl TransitionClient for HttpTransitionClient {
    async fn fetch(&self, notification_id: Uuid) -> AppResult<NotificationSnapshot> {
        let n = self.notification(notification_id).await?;
        Ok(snapshot_of(n))
    }

    async fn review(
        &self,
        notification_id: Uuid,
        action: ReviewAction,
    ) -> AppResult<NotificationSnapshot> {
        let request = self.http.post(self.url("/notifications/review")).json(&json!({
            "notificationId": notification_id,
            "action": action,
        }));
        let n: NotificationResponse = self.send(request).await?;
        Ok(snapshot_of(n))
    }
}

fn snapshot_of(n: NotificationResponse) -> NotificationSnapshot {
    NotificationSnapshot {
        id: n.id,
        title: n.title,
        status: n.status,
        has_notified_person: n.has_notified_person.unwrap_or(false),
        reviewer_id: n.reviewer_id,
    }
}

/// Rebuilds the server's error from an HTTP failure.
///
/// The `error` kind string wins when present; otherwise the status decides.
fn error_from_response(status: StatusCode, kind: &str, message: &str) -> AppError {
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        message.to_string()
    };

    match (kind, status) {
        ("invalid_transition", _) => AppError::invalid_transition(message),
        ("not_found", _) | (_, StatusCode::NOT_FOUND) => AppError::not_found(message),
        ("unauthorized", _) | (_, StatusCode::UNAUTHORIZED) => AppError::unauthorized(message),
        ("forbidden", _) | (_, StatusCode::FORBIDDEN) => AppError::forbidden(message),
        ("validation", _) | (_, StatusCode::BAD_REQUEST) => AppError::validation(message),
        ("conflict", _) | (_, StatusCode::CONFLICT) => AppError::conflict(message),
        (_, StatusCode::SERVICE_UNAVAILABLE) => AppError::service_unavailable(message),
        _ => AppError::internal(message),
    }
}
