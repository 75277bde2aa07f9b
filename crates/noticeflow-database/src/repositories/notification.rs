//! Notification and notified person repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use noticeflow_core::error::{AppError, ErrorKind};
use noticeflow_core::result::AppResult;
use noticeflow_core::types::pagination::{PageRequest, PageResponse};
use noticeflow_entity::notification::{
    CreateNotification, Notification, NotificationDetails, NotificationStatus, UpdateNotification,
};
use noticeflow_entity::person::{CreateNotifiedPerson, NotifiedPerson, UpdateNotifiedPerson};

use crate::store::{NotificationFilter, NotificationStore, StatusChange, duplicate_title};

/// PostgreSQL-backed [`NotificationStore`].
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn persons_for(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, NotifiedPerson>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let persons = sqlx::query_as::<_, NotifiedPerson>(
            "SELECT * FROM notified_persons WHERE notification_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load notified persons", e))?;

        Ok(persons
            .into_iter()
            .map(|p| (p.notification_id, p))
            .collect())
    }
}

fn db_error(message: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

fn status_names(filter: &NotificationFilter) -> Option<Vec<String>> {
    filter
        .statuses
        .as_ref()
        .map(|s| s.iter().map(|st| st.as_str().to_string()).collect())
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification by id", e)
            })
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<NotificationDetails>> {
        let Some(notification) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let person = self.find_person(id).await?;
        Ok(Some(NotificationDetails {
            notification,
            person,
        }))
    }

    async fn create(&self, data: &CreateNotification) -> AppResult<Notification> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Serialises creates of the same title until commit.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&data.title)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to lock title"))?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM notifications WHERE title = $1 AND canceled_at IS NULL)",
        )
        .bind(&data.title)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to check title"))?;
        if taken {
            return Err(duplicate_title(&data.title));
        }

        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, author_id, title, description, hearing_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.author_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.hearing_date)
        .bind(NotificationStatus::InProgress)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create notification"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit notification"))?;
        Ok(notification)
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationDetails>> {
        let statuses = status_names(filter);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE canceled_at IS NULL \
               AND ($1::uuid IS NULL OR author_id = $1) \
               AND ($2::text[] IS NULL OR status::text = ANY($2))",
        )
        .bind(filter.author_id)
        .bind(&statuses)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notifications", e))?;

        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE canceled_at IS NULL \
               AND ($1::uuid IS NULL OR author_id = $1) \
               AND ($2::text[] IS NULL OR status::text = ANY($2)) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.author_id)
        .bind(&statuses)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        let ids: Vec<Uuid> = notifications.iter().map(|n| n.id).collect();
        let mut persons = self.persons_for(&ids).await?;

        let items = notifications
            .into_iter()
            .map(|notification| NotificationDetails {
                person: persons.remove(&notification.id),
                notification,
            })
            .collect();

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn update_fields(
        &self,
        id: Uuid,
        data: &UpdateNotification,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET title = COALESCE($2, title), \
                                      description = COALESCE($3, description), \
                                      hearing_date = COALESCE($4, hearing_date), \
                                      updated_at = NOW() \
             WHERE id = $1 AND status <> 'validation' \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.hearing_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update notification", e))
    }

    async fn apply_status(&self, change: &StatusChange) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET status = $2, \
                                      reviewer_id = COALESCE($3, reviewer_id), \
                                      updated_at = NOW() \
             WHERE id = $1 AND ($4::notification_status IS NULL OR status = $4) \
             RETURNING *",
        )
        .bind(change.notification_id)
        .bind(change.to)
        .bind(change.reviewer_id)
        .bind(change.expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update notification status", e)
        })
    }

    async fn attach_person(&self, data: &CreateNotifiedPerson) -> AppResult<NotifiedPerson> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM notifications WHERE id = $1 FOR UPDATE",
        )
        .bind(data.notification_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock notification"))?;
        if exists.is_none() {
            return Err(AppError::not_found(format!(
                "Notification {} not found",
                data.notification_id
            )));
        }

        let person = sqlx::query_as::<_, NotifiedPerson>(
            "INSERT INTO notified_persons \
                 (id, notification_id, name, email, phone, cep, state, city, neighborhood, street) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.notification_id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.cep)
        .bind(&data.state)
        .bind(&data.city)
        .bind(&data.neighborhood)
        .bind(&data.street)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("notified_persons_notification_id_key") =>
            {
                AppError::conflict("This notification already has a notified person")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create notified person", e),
        })?;

        sqlx::query("UPDATE notifications SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(data.notification_id)
            .bind(NotificationStatus::Validation)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to move notification to validation"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit notified person"))?;

        Ok(person)
    }

    async fn find_person(&self, notification_id: Uuid) -> AppResult<Option<NotifiedPerson>> {
        sqlx::query_as::<_, NotifiedPerson>(
            "SELECT * FROM notified_persons WHERE notification_id = $1",
        )
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notified person", e))
    }

    async fn update_person(
        &self,
        notification_id: Uuid,
        data: &UpdateNotifiedPerson,
    ) -> AppResult<Option<NotifiedPerson>> {
        sqlx::query_as::<_, NotifiedPerson>(
            "UPDATE notified_persons p SET name = COALESCE($2, p.name), \
                                           email = COALESCE($3, p.email), \
                                           phone = COALESCE($4, p.phone), \
                                           cep = COALESCE($5, p.cep), \
                                           state = COALESCE($6, p.state), \
                                           city = COALESCE($7, p.city), \
                                           neighborhood = COALESCE($8, p.neighborhood), \
                                           street = COALESCE($9, p.street), \
                                           updated_at = NOW() \
             FROM notifications n \
             WHERE p.notification_id = $1 AND n.id = p.notification_id \
               AND n.status <> 'validation' \
             RETURNING p.*",
        )
        .bind(notification_id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.cep)
        .bind(&data.state)
        .bind(&data.city)
        .bind(&data.neighborhood)
        .bind(&data.street)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update notified person", e))
    }
}
