//! Notification lifecycle: creation, role-filtered reads, edits, person
//! attachment and review.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use noticeflow_core::error::AppError;
use noticeflow_core::types::pagination::{PageRequest, PageResponse};
use noticeflow_database::store::{NotificationFilter, NotificationStore};
use noticeflow_entity::notification::{
    CreateNotification, Notification, NotificationDetails, NotificationStatus, ReviewAction,
    UpdateNotification,
};
use noticeflow_entity::person::{CreateNotifiedPerson, NotifiedPerson, UpdateNotifiedPerson};
use noticeflow_entity::user::UserRole;

use super::presenter::available_actions;
use super::workflow::WorkflowPolicy;
use crate::context::RequestContext;

/// Input for a new notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Title, unique among live notifications.
    pub title: String,
    /// Description.
    pub description: String,
    /// When the hearing takes place.
    pub hearing_date: DateTime<Utc>,
}

/// A notification as seen by one caller.
#[derive(Debug, Clone)]
pub struct NotificationView {
    /// The row and its person.
    pub details: NotificationDetails,
    /// Review actions the caller is offered.
    pub available_actions: Vec<ReviewAction>,
}

impl NotificationView {
    fn for_viewer(details: NotificationDetails, role: UserRole) -> Self {
        let available_actions = available_actions(
            details.notification.status,
            details.has_notified_person(),
            role,
        );
        Self {
            details,
            available_actions,
        }
    }
}

/// Title length bounds, counted in characters after trimming.
const TITLE_CHARS: std::ops::RangeInclusive<usize> = 3..=120;
/// Description length bounds, counted in characters after trimming.
const DESCRIPTION_CHARS: std::ops::RangeInclusive<usize> = 10..=1000;

fn check_title(title: &str) -> Result<(), AppError> {
    if TITLE_CHARS.contains(&title.chars().count()) {
        Ok(())
    } else {
        Err(AppError::validation(
            "Title must be between 3 and 120 characters",
        ))
    }
}

fn check_description(description: &str) -> Result<(), AppError> {
    if DESCRIPTION_CHARS.contains(&description.chars().count()) {
        Ok(())
    } else {
        Err(AppError::validation(
            "Description must be between 10 and 1000 characters",
        ))
    }
}

/// Parse a hearing date given as RFC 3339 or as a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_hearing_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::validation("Hearing date must be a valid date"))
}

/// Notification operations. Every method takes the caller explicitly.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Transition rules.
    policy: WorkflowPolicy,
    /// Listing page size.
    page_size: u64,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, policy: WorkflowPolicy, page_size: u64) -> Self {
        Self {
            store,
            policy,
            page_size,
        }
    }

    /// The active transition policy.
    pub fn policy(&self) -> WorkflowPolicy {
        self.policy
    }

    /// Rows the caller may see: notifiers their own, reviewers and admins
    /// those awaiting or past review.
    fn projection(ctx: &RequestContext) -> NotificationFilter {
        match ctx.role {
            UserRole::Notifier => NotificationFilter {
                author_id: Some(ctx.user_id),
                statuses: None,
            },
            UserRole::Reviewer | UserRole::Admin => NotificationFilter {
                author_id: None,
                statuses: Some(NotificationStatus::reviewer_visible().to_vec()),
            },
        }
    }

    /// Load a live notification or fail `not_found`.
    async fn load(&self, id: Uuid) -> Result<NotificationDetails, AppError> {
        self.store
            .find_details(id)
            .await?
            .filter(|d| !d.notification.is_canceled())
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    fn ensure_editor(ctx: &RequestContext, notification: &Notification) -> Result<(), AppError> {
        if ctx.is_admin() || notification.author_id == ctx.user_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only the author can edit this notification",
            ))
        }
    }

    fn ensure_editable(notification: &Notification) -> Result<(), AppError> {
        if notification.status.is_editable() {
            Ok(())
        } else {
            Err(AppError::conflict(
                "Notification is under validation and cannot be edited",
            ))
        }
    }

    /// Create a notification in `in_progress`, authored by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewNotification,
    ) -> Result<Notification, AppError> {
        if ctx.role == UserRole::Reviewer {
            return Err(AppError::forbidden("Reviewers cannot create notifications"));
        }

        let title = input.title.trim().to_string();
        let description = input.description.trim().to_string();
        check_title(&title)?;
        check_description(&description)?;

        // Fails `conflict` when the title is taken.
        let notification = self
            .store
            .create(&CreateNotification {
                author_id: ctx.user_id,
                title,
                description,
                hearing_date: input.hearing_date,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            notification_id = %notification.id,
            "Notification created"
        );
        Ok(notification)
    }

    /// One page of the notifications the caller may see, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: u64,
    ) -> Result<PageResponse<NotificationView>, AppError> {
        let request = PageRequest::new(page, self.page_size);
        let filter = Self::projection(ctx);
        let rows = self.store.list(&filter, &request).await?;
        Ok(rows.map(|d| NotificationView::for_viewer(d, ctx.role)))
    }

    /// One notification, subject to the same visibility as [`list`](Self::list).
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<NotificationView, AppError> {
        let details = self.load(id).await?;
        if !Self::projection(ctx).matches(&details.notification) {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        Ok(NotificationView::for_viewer(details, ctx.role))
    }

    /// Edit title, description or hearing date. The status never changes.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut changes: UpdateNotification,
    ) -> Result<Notification, AppError> {
        changes.title = changes.title.map(|t| t.trim().to_string());
        changes.description = changes.description.map(|d| d.trim().to_string());
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(title) = &changes.title {
            check_title(title)?;
        }
        if let Some(description) = &changes.description {
            check_description(description)?;
        }

        let current = self.load(id).await?;
        Self::ensure_editor(ctx, &current.notification)?;
        Self::ensure_editable(&current.notification)?;

        // The status may have moved since the read.
        let updated = self
            .store
            .update_fields(id, &changes)
            .await?
            .ok_or_else(|| {
                AppError::conflict("Notification is under validation and cannot be edited")
            })?;

        info!(user_id = %ctx.user_id, notification_id = %id, "Notification edited");
        Ok(updated)
    }

    /// Attach the notified person and move the notification to `validation`.
    pub async fn attach_person(
        &self,
        ctx: &RequestContext,
        data: CreateNotifiedPerson,
    ) -> Result<NotifiedPerson, AppError> {
        if ctx.role == UserRole::Reviewer {
            return Err(AppError::forbidden(
                "Reviewers cannot submit notifications for validation",
            ));
        }

        let data = data.normalized();
        if self.policy.enforce {
            let current = self.load(data.notification_id).await?;
            if !ctx.is_admin() && current.notification.author_id != ctx.user_id {
                return Err(AppError::invalid_transition(
                    "Only the author can submit this notification for validation",
                ));
            }
            if current.notification.status != NotificationStatus::InProgress {
                return Err(AppError::invalid_transition(format!(
                    "Cannot submit a notification in {} for validation",
                    current.notification.status
                )));
            }
        }

        let person = self.store.attach_person(&data).await?;
        info!(
            user_id = %ctx.user_id,
            notification_id = %data.notification_id,
            to = %NotificationStatus::Validation,
            "Notified person attached"
        );
        Ok(person)
    }

    /// Edit the attached person's fields.
    pub async fn edit_person(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
        changes: UpdateNotifiedPerson,
    ) -> Result<NotifiedPerson, AppError> {
        let current = self.load(notification_id).await?;
        Self::ensure_editor(ctx, &current.notification)?;
        Self::ensure_editable(&current.notification)?;
        if current.person.is_none() {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} has no notified person"
            )));
        }

        let person = self
            .store
            .update_person(notification_id, &changes.normalized())
            .await?
            .ok_or_else(|| {
                AppError::conflict("Notification is under validation and cannot be edited")
            })?;

        info!(user_id = %ctx.user_id, notification_id = %notification_id, "Notified person edited");
        Ok(person)
    }

    /// Apply a review action. The returned view is the caller's, even when
    /// the new status falls outside what they can list.
    pub async fn review(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        action: ReviewAction,
    ) -> Result<NotificationView, AppError> {
        let current = self.load(id).await?;
        let change = self.policy.authorize(ctx, &current, action)?;

        let Some(updated) = self.store.apply_status(&change).await? else {
            if change.expected.is_some() {
                warn!(
                    notification_id = %id,
                    action = %action,
                    "Status changed concurrently; transition rejected"
                );
                return Err(AppError::invalid_transition(
                    "Notification status changed; reload and try again",
                ));
            }
            return Err(AppError::not_found(format!("Notification {id} not found")));
        };

        info!(
            user_id = %ctx.user_id,
            notification_id = %id,
            action = %action,
            from = %current.notification.status,
            to = %updated.status,
            "Notification reviewed"
        );
        let details = NotificationDetails {
            notification: updated,
            person: current.person,
        };
        Ok(NotificationView::for_viewer(details, ctx.role))
    }
}
