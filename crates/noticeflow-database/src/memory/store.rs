//! In-process implementation of every store trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use noticeflow_core::error::AppError;
use noticeflow_core::result::AppResult;
use noticeflow_core::types::pagination::{PageRequest, PageResponse};
use noticeflow_entity::form::FormSchema;
use noticeflow_entity::notification::{
    CreateNotification, Notification, NotificationDetails, NotificationStatus, UpdateNotification,
};
use noticeflow_entity::person::{CreateNotifiedPerson, NotifiedPerson, UpdateNotifiedPerson};
use noticeflow_entity::user::{CreateUser, User};

use crate::store::{
    FormSchemaStore, NotificationFilter, NotificationStore, StatusChange, UserStore,
    duplicate_title,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    notifications: HashMap<Uuid, Notification>,
    /// Keyed by notification id.
    persons: HashMap<Uuid, NotifiedPerson>,
    forms: Vec<FormSchema>,
}

impl MemoryState {
    fn details(&self, notification: &Notification) -> NotificationDetails {
        NotificationDetails {
            notification: notification.clone(),
            person: self.persons.get(&notification.id).cloned(),
        }
    }

    fn is_locked(&self, notification_id: Uuid) -> bool {
        self.notifications
            .get(&notification_id)
            .is_some_and(|n| !n.status.is_editable())
    }
}

/// Stores everything behind one lock so multi-row writes are atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.state.read().await.notifications.get(&id).cloned())
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<NotificationDetails>> {
        let state = self.state.read().await;
        Ok(state.notifications.get(&id).map(|n| state.details(n)))
    }

    async fn create(&self, data: &CreateNotification) -> AppResult<Notification> {
        let mut state = self.state.write().await;
        if state
            .notifications
            .values()
            .any(|n| n.canceled_at.is_none() && n.title == data.title)
        {
            return Err(duplicate_title(&data.title));
        }

        let now = Utc::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            author_id: data.author_id,
            reviewer_id: None,
            title: data.title.clone(),
            description: data.description.clone(),
            hearing_date: data.hearing_date,
            status: NotificationStatus::InProgress,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        };
        state
            .notifications
            .insert(notification.id, notification.clone());
        debug!(notification_id = %notification.id, "Stored notification in memory");
        Ok(notification)
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationDetails>> {
        let state = self.state.read().await;
        let mut rows: Vec<&Notification> = state
            .notifications
            .values()
            .filter(|n| filter.matches(n))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .map(|n| state.details(n))
            .collect();

        Ok(PageResponse::new(items, page, total))
    }

    async fn update_fields(
        &self,
        id: Uuid,
        data: &UpdateNotification,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        let Some(notification) = state.notifications.get_mut(&id) else {
            return Ok(None);
        };
        if !notification.status.is_editable() {
            return Ok(None);
        }
        if let Some(title) = &data.title {
            notification.title = title.clone();
        }
        if let Some(description) = &data.description {
            notification.description = description.clone();
        }
        if let Some(hearing_date) = data.hearing_date {
            notification.hearing_date = hearing_date;
        }
        notification.updated_at = Utc::now();
        Ok(Some(notification.clone()))
    }

    async fn apply_status(&self, change: &StatusChange) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        let Some(notification) = state.notifications.get_mut(&change.notification_id) else {
            return Ok(None);
        };
        if change.expected.is_some_and(|expected| notification.status != expected) {
            return Ok(None);
        }
        notification.status = change.to;
        if let Some(reviewer) = change.reviewer_id {
            notification.reviewer_id = Some(reviewer);
        }
        notification.updated_at = Utc::now();
        Ok(Some(notification.clone()))
    }

    async fn attach_person(&self, data: &CreateNotifiedPerson) -> AppResult<NotifiedPerson> {
        let mut state = self.state.write().await;
        if !state.notifications.contains_key(&data.notification_id) {
            return Err(AppError::not_found(format!(
                "Notification {} not found",
                data.notification_id
            )));
        }
        if state.persons.contains_key(&data.notification_id) {
            return Err(AppError::conflict(
                "This notification already has a notified person",
            ));
        }

        let now = Utc::now();
        let person = NotifiedPerson {
            id: Uuid::new_v4(),
            notification_id: data.notification_id,
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            cep: data.cep.clone(),
            state: data.state.clone(),
            city: data.city.clone(),
            neighborhood: data.neighborhood.clone(),
            street: data.street.clone(),
            created_at: now,
            updated_at: now,
        };
        state.persons.insert(data.notification_id, person.clone());
        if let Some(notification) = state.notifications.get_mut(&data.notification_id) {
            notification.status = NotificationStatus::Validation;
            notification.updated_at = now;
        }
        Ok(person)
    }

    async fn find_person(&self, notification_id: Uuid) -> AppResult<Option<NotifiedPerson>> {
        Ok(self.state.read().await.persons.get(&notification_id).cloned())
    }

    async fn update_person(
        &self,
        notification_id: Uuid,
        data: &UpdateNotifiedPerson,
    ) -> AppResult<Option<NotifiedPerson>> {
        let mut state = self.state.write().await;
        if state.is_locked(notification_id) {
            return Ok(None);
        }
        let Some(person) = state.persons.get_mut(&notification_id) else {
            return Ok(None);
        };
        data.clone().apply_to(person);
        person.updated_at = Utc::now();
        Ok(Some(person.clone()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict(format!(
                "Email '{}' already in use",
                data.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.to_lowercase(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl FormSchemaStore for MemoryStore {
    async fn find_active(&self, step_key: &str) -> AppResult<Option<FormSchema>> {
        let state = self.state.read().await;
        Ok(state
            .forms
            .iter()
            .find(|f| f.is_active && f.step_key == step_key)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<FormSchema>> {
        let mut forms = self.state.read().await.forms.clone();
        forms.sort_by(|a, b| a.step_key.cmp(&b.step_key).then(a.version.cmp(&b.version)));
        Ok(forms)
    }

    async fn publish(&self, step_key: &str, schema_json: &Value) -> AppResult<(FormSchema, bool)> {
        let mut state = self.state.write().await;
        if let Some(active) = state
            .forms
            .iter()
            .find(|f| f.is_active && f.step_key == step_key && &f.schema_json == schema_json)
        {
            return Ok((active.clone(), false));
        }

        let now = Utc::now();
        let mut latest = 0;
        for form in state.forms.iter_mut().filter(|f| f.step_key == step_key) {
            latest = latest.max(form.version);
            if form.is_active {
                form.is_active = false;
                form.updated_at = now;
            }
        }

        let created = FormSchema {
            id: Uuid::new_v4(),
            step_key: step_key.to_string(),
            version: latest + 1,
            is_active: true,
            schema_json: schema_json.clone(),
            created_at: now,
            updated_at: now,
        };
        state.forms.push(created.clone());
        Ok((created, true))
    }
}
