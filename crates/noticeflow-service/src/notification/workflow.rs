//! The transition authority: decides whether a review action may be applied
//! and what status write it produces.

use tracing::debug;

use noticeflow_core::config::workflow::WorkflowConfig;
use noticeflow_core::error::AppError;
use noticeflow_database::store::StatusChange;
use noticeflow_entity::notification::{NotificationDetails, ReviewAction};

use crate::context::RequestContext;

/// Rules applied to review actions.
///
/// Role checks always run. Status checks run only when `enforce` is set, in
/// which case the write is also guarded by the status it was checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowPolicy {
    /// Check preconditions against the stored status.
    pub enforce: bool,
}

impl WorkflowPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self {
            enforce: config.enforce_transitions,
        }
    }

    /// Policy that applies actions from any status.
    pub fn permissive() -> Self {
        Self { enforce: false }
    }

    /// Policy that checks every precondition.
    pub fn strict() -> Self {
        Self { enforce: true }
    }

    /// Validate `action` against the caller and the current row, returning
    /// the status write to perform.
    pub fn authorize(
        &self,
        ctx: &RequestContext,
        current: &NotificationDetails,
        action: ReviewAction,
    ) -> Result<StatusChange, AppError> {
        if !action.allowed_for(ctx.role) {
            return Err(AppError::forbidden(format!(
                "Role '{}' cannot {} notifications",
                ctx.role, action
            )));
        }

        let notification = &current.notification;
        let expected = if self.enforce {
            let required = action.required_status();
            if notification.status != required {
                return Err(AppError::invalid_transition(format!(
                    "Cannot {action} a notification in status '{}'",
                    notification.status
                )));
            }
            if action == ReviewAction::Validate {
                if !current.has_notified_person() {
                    return Err(AppError::invalid_transition(
                        "A notified person must be attached before validation",
                    ));
                }
                if !ctx.is_admin() && notification.author_id != ctx.user_id {
                    return Err(AppError::invalid_transition(
                        "Only the author can submit this notification for validation",
                    ));
                }
            }
            Some(required)
        } else {
            None
        };

        debug!(
            notification_id = %notification.id,
            action = %action,
            from = %notification.status,
            to = %action.target_status(),
            enforce = self.enforce,
            "Authorized transition"
        );

        Ok(StatusChange {
            notification_id: notification.id,
            to: action.target_status(),
            reviewer_id: action.records_reviewer().then_some(ctx.user_id),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noticeflow_core::error::ErrorKind;
    use noticeflow_entity::notification::{Notification, NotificationStatus};
    use noticeflow_entity::user::UserRole;
    use uuid::Uuid;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "Tester".into(), "t@example.com".into())
    }

    fn details(author: Uuid, status: NotificationStatus, with_person: bool) -> NotificationDetails {
        let id = Uuid::new_v4();
        let now = Utc::now();
        NotificationDetails {
            notification: Notification {
                id,
                author_id: author,
                reviewer_id: None,
                title: "Hearing".into(),
                description: "Hearing description".into(),
                hearing_date: now,
                status,
                canceled_at: None,
                created_at: now,
                updated_at: now,
            },
            person: with_person.then(|| noticeflow_entity::person::NotifiedPerson {
                id: Uuid::new_v4(),
                notification_id: id,
                name: "João Souza".into(),
                email: "joao@example.com".into(),
                phone: "11987654321".into(),
                cep: "01310100".into(),
                state: "SP".into(),
                city: "São Paulo".into(),
                neighborhood: "Bela Vista".into(),
                street: "Avenida Paulista".into(),
                created_at: now,
                updated_at: now,
            }),
        }
    }

    #[test]
    fn test_permissive_approve_from_any_status() {
        let reviewer = ctx(UserRole::Reviewer);
        for status in [
            NotificationStatus::InProgress,
            NotificationStatus::Validation,
            NotificationStatus::Completed,
        ] {
            let change = WorkflowPolicy::permissive()
                .authorize(&reviewer, &details(Uuid::new_v4(), status, false), ReviewAction::Approve)
                .unwrap();
            assert_eq!(change.to, NotificationStatus::Completed);
            assert_eq!(change.reviewer_id, Some(reviewer.user_id));
            assert_eq!(change.expected, None);
        }
    }

    #[test]
    fn test_validate_does_not_record_reviewer() {
        let notifier = ctx(UserRole::Notifier);
        let change = WorkflowPolicy::permissive()
            .authorize(
                &notifier,
                &details(notifier.user_id, NotificationStatus::InProgress, false),
                ReviewAction::Validate,
            )
            .unwrap();
        assert_eq!(change.to, NotificationStatus::Validation);
        assert_eq!(change.reviewer_id, None);
    }

    #[test]
    fn test_roles_checked_in_both_modes() {
        let notifier = ctx(UserRole::Notifier);
        let row = details(notifier.user_id, NotificationStatus::Validation, true);
        for policy in [WorkflowPolicy::permissive(), WorkflowPolicy::strict()] {
            let err = policy
                .authorize(&notifier, &row, ReviewAction::Approve)
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
        }
        let err = WorkflowPolicy::permissive()
            .authorize(&ctx(UserRole::Reviewer), &row, ReviewAction::Validate)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_strict_requires_status() {
        let reviewer = ctx(UserRole::Reviewer);
        let err = WorkflowPolicy::strict()
            .authorize(
                &reviewer,
                &details(Uuid::new_v4(), NotificationStatus::InProgress, true),
                ReviewAction::Back,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let change = WorkflowPolicy::strict()
            .authorize(
                &reviewer,
                &details(Uuid::new_v4(), NotificationStatus::Validation, true),
                ReviewAction::Back,
            )
            .unwrap();
        assert_eq!(change.expected, Some(NotificationStatus::Validation));
    }

    #[test]
    fn test_strict_validate_needs_person_and_author() {
        let notifier = ctx(UserRole::Notifier);
        let policy = WorkflowPolicy::strict();

        let no_person = details(notifier.user_id, NotificationStatus::InProgress, false);
        assert_eq!(
            policy
                .authorize(&notifier, &no_person, ReviewAction::Validate)
                .unwrap_err()
                .kind,
            ErrorKind::InvalidTransition
        );

        let someone_elses = details(Uuid::new_v4(), NotificationStatus::InProgress, true);
        assert_eq!(
            policy
                .authorize(&notifier, &someone_elses, ReviewAction::Validate)
                .unwrap_err()
                .kind,
            ErrorKind::InvalidTransition
        );
        assert!(
            policy
                .authorize(&ctx(UserRole::Admin), &someone_elses, ReviewAction::Validate)
                .is_ok()
        );
    }
}
