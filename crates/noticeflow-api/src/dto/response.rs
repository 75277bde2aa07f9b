//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noticeflow_core::types::pagination::{PageMeta, PageResponse};
use noticeflow_entity::notification::{Notification, NotificationStatus, ReviewAction};
use noticeflow_entity::person::NotifiedPerson;
use noticeflow_entity::user::{User, UserRole};
use noticeflow_service::NotificationView;

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination, for list endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Creates a successful paged response.
    pub fn paged(message: impl Into<String>, page: PageResponse<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(page.items),
            meta: Some(page.meta),
        }
    }
}

impl ApiResponse<()> {
    /// A successful response without data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Access token.
    pub access_token: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// Signed-in user.
    pub user: UserResponse,
}

/// Notified person in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    /// Person ID.
    pub id: Uuid,
    /// Owning notification.
    pub notification_id: Uuid,
    /// Full name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Phone, digits only.
    pub phone: String,
    /// Postal code, digits only.
    pub cep: String,
    /// State code.
    pub state: String,
    /// City.
    pub city: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Street.
    pub street: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<NotifiedPerson> for PersonResponse {
    fn from(p: NotifiedPerson) -> Self {
        Self {
            id: p.id,
            notification_id: p.notification_id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            cep: p.cep,
            state: p.state,
            city: p.city,
            neighborhood: p.neighborhood,
            street: p.street,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Notification in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Notification ID.
    pub id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Last reviewer.
    pub reviewer_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Hearing date.
    pub hearing_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: NotificationStatus,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Attached person. Present on reads and review answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_person: Option<PersonResponse>,
    /// Whether a person is attached. Present on reads and review answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_notified_person: Option<bool>,
    /// Actions offered to the caller. Present on reads and review answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_actions: Option<Vec<ReviewAction>>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            author_id: n.author_id,
            reviewer_id: n.reviewer_id,
            title: n.title,
            description: n.description,
            hearing_date: n.hearing_date,
            status: n.status,
            created_at: n.created_at,
            updated_at: n.updated_at,
            notified_person: None,
            has_notified_person: None,
            available_actions: None,
        }
    }
}

impl From<NotificationView> for NotificationResponse {
    fn from(view: NotificationView) -> Self {
        let has_person = view.details.has_notified_person();
        let mut response = Self::from(view.details.notification);
        response.notified_person = view.details.person.map(PersonResponse::from);
        response.has_notified_person = Some(has_person);
        response.available_actions = Some(view.available_actions);
        response
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Backing store status.
    pub database: String,
    /// Version.
    pub version: String,
}
