//! Notification lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of a notification in the review workflow.
///
/// New notifications start at `InProgress`. Attaching a notified person
/// moves them to `Validation`, where a reviewer either approves them
/// (`Completed`) or sends them back (`InProgress`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Being drafted by its author.
    InProgress,
    /// Waiting for a reviewer.
    Validation,
    /// Approved by a reviewer.
    Completed,
}

impl NotificationStatus {
    /// Whether title, description, hearing date and person may be edited.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Validation)
    }

    /// Statuses reviewers are allowed to list.
    pub fn reviewer_visible() -> [Self; 2] {
        [Self::Validation, Self::Completed]
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Validation => "validation",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = noticeflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "validation" => Ok(Self::Validation),
            "completed" => Ok(Self::Completed),
            _ => Err(noticeflow_core::AppError::validation(format!(
                "Invalid notification status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_is_locked() {
        assert!(NotificationStatus::InProgress.is_editable());
        assert!(!NotificationStatus::Validation.is_editable());
        assert!(NotificationStatus::Completed.is_editable());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&NotificationStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(
            "completed".parse::<NotificationStatus>().unwrap(),
            NotificationStatus::Completed
        );
    }
}
