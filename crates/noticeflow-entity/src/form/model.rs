//! Stored form schema rows and their parsed definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use noticeflow_core::AppResult;

use super::field::{FieldError, FormField};

/// A versioned form schema for one step. Only one version per step is active.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormSchema {
    /// Unique row identifier.
    pub id: Uuid,
    /// Step this schema describes, e.g. `CREATE_NOTIFICATION`.
    pub step_key: String,
    /// Monotonic version within the step.
    pub version: i32,
    /// Whether this version is served to clients.
    pub is_active: bool,
    /// The serialized [`FormDefinition`].
    pub schema_json: Value,
    /// When the version was created.
    pub created_at: DateTime<Utc>,
    /// When the version was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FormSchema {
    /// Parse the stored JSON into a definition.
    pub fn definition(&self) -> AppResult<FormDefinition> {
        Ok(serde_json::from_value(self.schema_json.clone())?)
    }
}

/// The form a client renders for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Step this form belongs to.
    pub step_key: String,
    /// Form heading.
    pub title: String,
    /// Ordered fields.
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    /// Validate a submission field by field, stopping at the first error.
    pub fn validate(&self, submission: &Map<String, Value>) -> Result<(), FieldError> {
        self.fields
            .iter()
            .try_for_each(|field| field.validate(submission.get(&field.id)))
    }
}
