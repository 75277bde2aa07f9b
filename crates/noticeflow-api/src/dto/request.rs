//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use noticeflow_entity::notification::UpdateNotification;
use noticeflow_entity::person::{CreateNotifiedPerson, UpdateNotifiedPerson};

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Account email.
    #[validate(email(message = "Email must be a valid email"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 50, message = "Password must be between 8 and 50 characters"))]
    pub password: String,
}

/// Create notification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Title.
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters"))]
    pub title: String,
    /// Description.
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: String,
    /// Hearing date, RFC 3339 or `YYYY-MM-DD`.
    pub hearing_date: String,
}

/// Edit notification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationRequest {
    /// Target notification.
    pub notification_id: Uuid,
    /// New title.
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters"))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: Option<String>,
    /// New hearing date.
    pub hearing_date: Option<String>,
}

impl UpdateNotificationRequest {
    /// Field changes, with the hearing date already parsed.
    pub fn into_changes(
        self,
        hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> UpdateNotification {
        UpdateNotification {
            title: self.title,
            description: self.description,
            hearing_date,
        }
    }
}

/// Attach notified person request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    /// Target notification.
    pub notification_id: Uuid,
    /// Full name.
    #[validate(length(min = 5, max = 100, message = "Name must be between 5 and 100 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "Email must be a valid email"))]
    pub email: String,
    /// Phone number, any formatting.
    pub phone: String,
    /// Postal code, with or without hyphen.
    #[validate(length(min = 8, max = 9, message = "CEP must have 8 digits, with or without hyphen"))]
    pub cep: String,
    /// Two-letter state code.
    #[validate(length(equal = 2, message = "State must have exactly 2 characters"))]
    pub state: String,
    /// City.
    #[validate(length(min = 5, max = 100, message = "City must be between 5 and 100 characters"))]
    pub city: String,
    /// Neighborhood.
    #[validate(length(
        min = 5,
        max = 100,
        message = "Neighborhood must be between 5 and 100 characters"
    ))]
    pub neighborhood: String,
    /// Street.
    #[validate(length(min = 5, max = 100, message = "Street must be between 5 and 100 characters"))]
    pub street: String,
}

impl From<CreatePersonRequest> for CreateNotifiedPerson {
    fn from(req: CreatePersonRequest) -> Self {
        Self {
            notification_id: req.notification_id,
            name: req.name,
            email: req.email,
            phone: req.phone,
            cep: req.cep,
            state: req.state,
            city: req.city,
            neighborhood: req.neighborhood,
            street: req.street,
        }
    }
}

/// Edit notified person request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    /// Target notification.
    pub notification_id: Uuid,
    /// Full name.
    #[validate(length(min = 5, max = 100, message = "Name must be between 5 and 100 characters"))]
    pub name: Option<String>,
    /// Contact email.
    #[validate(email(message = "Email must be a valid email"))]
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal code.
    #[validate(length(min = 8, max = 9, message = "CEP must have 8 digits, with or without hyphen"))]
    pub cep: Option<String>,
    /// State code.
    #[validate(length(equal = 2, message = "State must have exactly 2 characters"))]
    pub state: Option<String>,
    /// City.
    #[validate(length(min = 5, max = 100, message = "City must be between 5 and 100 characters"))]
    pub city: Option<String>,
    /// Neighborhood.
    #[validate(length(
        min = 5,
        max = 100,
        message = "Neighborhood must be between 5 and 100 characters"
    ))]
    pub neighborhood: Option<String>,
    /// Street.
    #[validate(length(min = 5, max = 100, message = "Street must be between 5 and 100 characters"))]
    pub street: Option<String>,
}

impl UpdatePersonRequest {
    /// Split into the target id and the field changes.
    pub fn into_parts(self) -> (Uuid, UpdateNotifiedPerson) {
        (
            self.notification_id,
            UpdateNotifiedPerson {
                name: self.name,
                email: self.email,
                phone: self.phone,
                cep: self.cep,
                state: self.state,
                city: self.city,
                neighborhood: self.neighborhood,
                street: self.street,
            },
        )
    }
}

/// Review action request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Target notification.
    pub notification_id: Uuid,
    /// `approve`, `back` or `validate`.
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}
