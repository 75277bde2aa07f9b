//! Form schema lookup, submission validation and seeding.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use noticeflow_core::error::AppError;
use noticeflow_database::store::FormSchemaStore;
use noticeflow_entity::form::builtin::builtin_forms;
use noticeflow_entity::form::{FormDefinition, FormSchema};

/// Serves the active form for each step.
#[derive(Debug, Clone)]
pub struct FormService {
    /// Form schema store.
    forms: Arc<dyn FormSchemaStore>,
}

impl FormService {
    /// Creates a new form service.
    pub fn new(forms: Arc<dyn FormSchemaStore>) -> Self {
        Self { forms }
    }

    /// The active definition for `step_key`.
    pub async fn active_schema(&self, step_key: &str) -> Result<FormDefinition, AppError> {
        let row = self
            .forms
            .find_active(step_key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No active form for step '{step_key}'")))?;
        row.definition()
    }

    /// Check a submission against the active form. Only the first failing
    /// field is reported.
    pub async fn validate_submission(
        &self,
        step_key: &str,
        submission: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let definition = self.active_schema(step_key).await?;
        definition.validate(submission).map_err(|e| {
            debug!(step_key, field = %e.field, "Form submission rejected");
            AppError::validation(e.message)
        })
    }

    /// Publish one definition as the active version of its step.
    /// Returns the active row and whether a new version was written.
    pub async fn publish(&self, definition: &FormDefinition) -> Result<(FormSchema, bool), AppError> {
        let json = serde_json::to_value(definition)?;
        let (row, created) = self.forms.publish(&definition.step_key, &json).await?;
        if created {
            info!(step_key = %row.step_key, version = row.version, "Published form version");
        }
        Ok((row, created))
    }

    /// Publish every built-in form. Returns how many new versions were written.
    pub async fn seed_builtin(&self) -> Result<usize, AppError> {
        let mut created = 0;
        for definition in builtin_forms() {
            if self.publish(&definition).await?.1 {
                created += 1;
            }
        }
        info!(created, "Built-in forms seeded");
        Ok(created)
    }

    /// Every stored version, active or not.
    pub async fn list_versions(&self) -> Result<Vec<FormSchema>, AppError> {
        self.forms.list().await
    }
}
