//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::NotificationStatus;
use crate::person::NotifiedPerson;

/// A hearing notice tracked through the review workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The notifier who created it.
    pub author_id: Uuid,
    /// Last reviewer who approved it or sent it back.
    pub reviewer_id: Option<Uuid>,
    /// Title, unique among non-canceled notifications.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// When the hearing takes place.
    pub hearing_date: DateTime<Utc>,
    /// Workflow status.
    pub status: NotificationStatus,
    /// Canceled notifications are hidden from listings.
    pub canceled_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been canceled.
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }
}

/// A notification together with its notified person, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDetails {
    /// The notification row.
    pub notification: Notification,
    /// The attached person.
    pub person: Option<NotifiedPerson>,
}

impl NotificationDetails {
    /// Whether a person has been attached.
    pub fn has_notified_person(&self) -> bool {
        self.person.is_some()
    }
}

/// Data required to create a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// Creating user.
    pub author_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Hearing date.
    pub hearing_date: DateTime<Utc>,
}

/// Field changes for an existing notification. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotification {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New hearing date.
    pub hearing_date: Option<DateTime<Utc>>,
}

impl UpdateNotification {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.hearing_date.is_none()
    }
}
