//! Review actions accepted by the transition endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::status::NotificationStatus;
use crate::user::UserRole;

/// An action that moves a notification to another status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Reviewer accepts the notification.
    Approve,
    /// Reviewer returns the notification to its author.
    Back,
    /// Author submits the notification for review.
    Validate,
}

impl ReviewAction {
    /// Status written when the action is applied.
    pub fn target_status(&self) -> NotificationStatus {
        match self {
            Self::Approve => NotificationStatus::Completed,
            Self::Back => NotificationStatus::InProgress,
            Self::Validate => NotificationStatus::Validation,
        }
    }

    /// Status the action is legal from when transitions are enforced.
    pub fn required_status(&self) -> NotificationStatus {
        match self {
            Self::Approve | Self::Back => NotificationStatus::Validation,
            Self::Validate => NotificationStatus::InProgress,
        }
    }

    /// Whether applying the action records the actor as reviewer.
    pub fn records_reviewer(&self) -> bool {
        matches!(self, Self::Approve | Self::Back)
    }

    /// Whether a user with `role` may request this action.
    pub fn allowed_for(&self, role: UserRole) -> bool {
        match self {
            Self::Approve | Self::Back => role.is_reviewer(),
            Self::Validate => matches!(role, UserRole::Notifier | UserRole::Admin),
        }
    }

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Back => "back",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewAction {
    type Err = noticeflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "back" => Ok(Self::Back),
            "validate" => Ok(Self::Validate),
            _ => Err(noticeflow_core::AppError::validation(format!(
                "Invalid action: '{s}'. Expected one of: approve, back, validate"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(ReviewAction::Approve.target_status(), NotificationStatus::Completed);
        assert_eq!(ReviewAction::Back.target_status(), NotificationStatus::InProgress);
        assert_eq!(ReviewAction::Validate.target_status(), NotificationStatus::Validation);
    }

    #[test]
    fn test_role_rules() {
        assert!(ReviewAction::Approve.allowed_for(UserRole::Reviewer));
        assert!(ReviewAction::Back.allowed_for(UserRole::Admin));
        assert!(!ReviewAction::Approve.allowed_for(UserRole::Notifier));
        assert!(ReviewAction::Validate.allowed_for(UserRole::Notifier));
        assert!(ReviewAction::Validate.allowed_for(UserRole::Admin));
        assert!(!ReviewAction::Validate.allowed_for(UserRole::Reviewer));
    }

    #[test]
    fn test_only_review_actions_record_reviewer() {
        assert!(ReviewAction::Approve.records_reviewer());
        assert!(ReviewAction::Back.records_reviewer());
        assert!(!ReviewAction::Validate.records_reviewer());
    }
}
