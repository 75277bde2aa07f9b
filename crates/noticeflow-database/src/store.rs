//! Storage traits consumed by the service layer, and the provider bundle.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use noticeflow_core::config::database::{DatabaseConfig, DatabaseProvider};
use noticeflow_core::error::AppError;
use noticeflow_core::result::AppResult;
use noticeflow_core::types::pagination::{PageRequest, PageResponse};
use noticeflow_entity::form::FormSchema;
use noticeflow_entity::notification::{
    CreateNotification, Notification, NotificationDetails, NotificationStatus, UpdateNotification,
};
use noticeflow_entity::person::{CreateNotifiedPerson, NotifiedPerson, UpdateNotifiedPerson};
use noticeflow_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{FormSchemaRepository, NotificationRepository, UserRepository};

/// Row filter for notification listings. Canceled rows are always excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    /// Only notifications created by this user.
    pub author_id: Option<Uuid>,
    /// Only notifications in one of these statuses.
    pub statuses: Option<Vec<NotificationStatus>>,
}

impl NotificationFilter {
    /// Whether a row passes the filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        notification.canceled_at.is_none()
            && self
                .author_id
                .is_none_or(|author| notification.author_id == author)
            && self
                .statuses
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&notification.status))
    }
}

/// A status write produced by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Target notification.
    pub notification_id: Uuid,
    /// Status to write.
    pub to: NotificationStatus,
    /// Reviewer to record. `None` keeps the current value.
    pub reviewer_id: Option<Uuid>,
    /// When set, the write only happens if the row is still in this status.
    pub expected: Option<NotificationStatus>,
}

/// Error for a create whose title is held by a live notification.
pub(crate) fn duplicate_title(title: &str) -> AppError {
    AppError::conflict(format!("A notification titled '{title}' already exists"))
}

/// Notification and notified person persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a notification by id, canceled or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Find a notification with its person.
    async fn find_details(&self, id: Uuid) -> AppResult<Option<NotificationDetails>>;

    /// Insert a notification in `in_progress`. Fails `conflict` when a
    /// non-canceled notification already uses the title; the check and the
    /// insert are one atomic step.
    async fn create(&self, data: &CreateNotification) -> AppResult<Notification>;

    /// One page of notifications, newest first, each with its person.
    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationDetails>>;

    /// Update title, description or hearing date. Returns `None` when the
    /// row does not exist or is in `validation`.
    async fn update_fields(
        &self,
        id: Uuid,
        data: &UpdateNotification,
    ) -> AppResult<Option<Notification>>;

    /// Write a status change as one row update. Returns `None` when the row
    /// does not exist or the expected status no longer holds.
    async fn apply_status(&self, change: &StatusChange) -> AppResult<Option<Notification>>;

    /// Insert the person and move the notification to `validation`
    /// atomically. Fails `not_found` for an unknown notification and
    /// `conflict` if a person is already attached.
    async fn attach_person(&self, data: &CreateNotifiedPerson) -> AppResult<NotifiedPerson>;

    /// The person attached to a notification.
    async fn find_person(&self, notification_id: Uuid) -> AppResult<Option<NotifiedPerson>>;

    /// Update person fields. Returns `None` when no person is attached or
    /// the notification is in `validation`.
    async fn update_person(
        &self,
        notification_id: Uuid,
        data: &UpdateNotifiedPerson,
    ) -> AppResult<Option<NotifiedPerson>>;
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Fails `conflict` on a duplicate email.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// All users, newest first.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;
}

/// Versioned form schema persistence.
#[async_trait]
pub trait FormSchemaStore: Send + Sync + std::fmt::Debug + 'static {
    /// The active version for a step.
    async fn find_active(&self, step_key: &str) -> AppResult<Option<FormSchema>>;

    /// Every stored version, ordered by step then version.
    async fn list(&self) -> AppResult<Vec<FormSchema>>;

    /// Make `schema_json` the active version for `step_key`.
    ///
    /// If the active version already holds the same JSON nothing changes.
    /// Otherwise older versions are deactivated and a new version is
    /// inserted. Returns the active row and whether it was created.
    async fn publish(&self, step_key: &str, schema_json: &Value) -> AppResult<(FormSchema, bool)>;
}

/// The stores selected by `database.provider`.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Notification and person store.
    pub notifications: Arc<dyn NotificationStore>,
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Form schema store.
    pub forms: Arc<dyn FormSchemaStore>,
    /// Set for the PostgreSQL provider.
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores for the configured provider, running migrations
    /// first when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(&db).await?;
                }
                Ok(Self::postgres(db))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory())
            }
        }
    }

    /// PostgreSQL repositories over an existing pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            forms: Arc::new(FormSchemaRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Fresh, empty in-memory stores sharing one state.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            notifications: store.clone(),
            users: store.clone(),
            forms: store,
            pool: None,
        }
    }

    /// The PostgreSQL pool, if that provider is in use.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Close the pool, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
