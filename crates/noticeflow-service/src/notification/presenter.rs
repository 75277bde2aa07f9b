//! Client-side gating of review actions.
//!
//! The presenter derives which actions a viewer may trigger from the last
//! snapshot the server returned, sends at most one request at a time, and
//! always refetches afterwards. It never updates the status optimistically;
//! the server remains the authority.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use noticeflow_core::error::{AppError, ErrorKind};
use noticeflow_core::result::AppResult;
use noticeflow_entity::notification::{NotificationStatus, ReviewAction};
use noticeflow_entity::user::UserRole;

/// The parts of a notification the presenter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSnapshot {
    /// Notification id.
    pub id: Uuid,
    /// Title, for display.
    pub title: String,
    /// Status as last reported by the server.
    pub status: NotificationStatus,
    /// Whether a notified person is attached.
    pub has_notified_person: bool,
    /// Last reviewer, if any.
    pub reviewer_id: Option<Uuid>,
}

/// Actions a viewer with `role` may trigger on a notification.
///
/// Notifiers may submit an `in_progress` notification once a person is
/// attached. Reviewers and admins may approve or send back a notification
/// in `validation`. Nothing else is offered.
pub fn available_actions(
    status: NotificationStatus,
    has_notified_person: bool,
    role: UserRole,
) -> Vec<ReviewAction> {
    match (role, status) {
        (UserRole::Notifier, NotificationStatus::InProgress) if has_notified_person => {
            vec![ReviewAction::Validate]
        }
        (UserRole::Reviewer | UserRole::Admin, NotificationStatus::Validation) => {
            vec![ReviewAction::Back, ReviewAction::Approve]
        }
        _ => Vec::new(),
    }
}

/// Transport used by the presenter to reach the transition authority.
#[async_trait]
pub trait TransitionClient: Send + Sync {
    /// Fetch the current state of a notification.
    async fn fetch(&self, notification_id: Uuid) -> AppResult<NotificationSnapshot>;

    /// Request a review action, returning the notification as the server
    /// left it.
    async fn review(
        &self,
        notification_id: Uuid,
        action: ReviewAction,
    ) -> AppResult<NotificationSnapshot>;
}

/// What happened when an action was triggered.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The server accepted the action.
    Applied,
    /// The action was refused, locally or by the server.
    Rejected(AppError),
    /// Another action is still in flight; nothing was sent.
    Busy,
}

/// Resets the in-flight flag even if the request future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Last server answer, and whether the viewer can still read the row.
#[derive(Debug, Default)]
struct ViewState {
    snapshot: Option<NotificationSnapshot>,
    in_view: bool,
}

/// Drives review actions for one notification on behalf of one viewer.
pub struct TransitionPresenter<C> {
    client: C,
    notification_id: Uuid,
    viewer_role: UserRole,
    view: RwLock<ViewState>,
    in_flight: AtomicBool,
}

impl<C: TransitionClient> TransitionPresenter<C> {
    /// Create a presenter. Call [`refresh`](Self::refresh) before rendering.
    pub fn new(client: C, notification_id: Uuid, viewer_role: UserRole) -> Self {
        Self {
            client,
            notification_id,
            viewer_role,
            view: RwLock::new(ViewState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fetch the notification and replace the cached snapshot.
    ///
    /// A `not_found` answer means the row left the viewer's projection
    /// (a reviewer sending it back, for one). The snapshot is kept for
    /// display but no action is offered afterwards.
    pub async fn refresh(&self) -> AppResult<NotificationSnapshot> {
        match self.client.fetch(self.notification_id).await {
            Ok(fresh) => {
                self.store(fresh.clone()).await;
                Ok(fresh)
            }
            Err(e) => {
                if e.kind == ErrorKind::NotFound {
                    self.view.write().await.in_view = false;
                }
                Err(e)
            }
        }
    }

    async fn store(&self, snapshot: NotificationSnapshot) {
        let mut view = self.view.write().await;
        view.snapshot = Some(snapshot);
        view.in_view = true;
    }

    /// The last snapshot received from the server.
    pub async fn snapshot(&self) -> Option<NotificationSnapshot> {
        self.view.read().await.snapshot.clone()
    }

    /// Whether the last read succeeded. `false` once the server answered
    /// `not_found`.
    pub async fn in_view(&self) -> bool {
        self.view.read().await.in_view
    }

    /// Actions offered for the current snapshot. Empty until loaded and
    /// once the row is out of view.
    pub async fn actions(&self) -> Vec<ReviewAction> {
        let view = self.view.read().await;
        match view.snapshot.as_ref() {
            Some(s) if view.in_view => {
                available_actions(s.status, s.has_notified_person, self.viewer_role)
            }
            _ => Vec::new(),
        }
    }

    /// Whether a request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send `action` to the server, then refetch.
    ///
    /// Actions not currently offered are rejected without a request. The
    /// server's answer to the action replaces the snapshot first, so a
    /// failed refetch leaves the newest known state in place.
    pub async fn trigger(&self, action: ReviewAction) -> TransitionOutcome {
        if !self.actions().await.contains(&action) {
            return TransitionOutcome::Rejected(AppError::validation(format!(
                "Action '{action}' is not available for this notification"
            )));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(notification_id = %self.notification_id, "Ignoring action while busy");
            return TransitionOutcome::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let result = match self.client.review(self.notification_id, action).await {
            Ok(updated) => {
                self.store(updated).await;
                Ok(())
            }
            Err(e) => Err(e),
        };

        if let Err(e) = self.refresh().await {
            warn!(
                notification_id = %self.notification_id,
                error = %e,
                "Refetch after review failed; keeping previous snapshot"
            );
        }

        match result {
            Ok(()) => TransitionOutcome::Applied,
            Err(e) => TransitionOutcome::Rejected(e),
        }
    }
}
