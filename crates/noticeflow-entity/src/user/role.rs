//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles that gate the notification workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates notifications and submits them for review.
    Notifier,
    /// Approves notifications or sends them back.
    Reviewer,
    /// Holds every workflow permission.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Reviewer-level access: reviewers and admins.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notifier => "notifier",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = noticeflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notifier" => Ok(Self::Notifier),
            "reviewer" => Ok(Self::Reviewer),
            "admin" => Ok(Self::Admin),
            _ => Err(noticeflow_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: notifier, reviewer, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_access() {
        assert!(UserRole::Reviewer.is_reviewer());
        assert!(UserRole::Admin.is_reviewer());
        assert!(!UserRole::Notifier.is_reviewer());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("REVIEWER".parse::<UserRole>().unwrap(), UserRole::Reviewer);
        assert!("viewer".parse::<UserRole>().is_err());
    }
}
