//! Form schema repository implementation.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use noticeflow_core::error::{AppError, ErrorKind};
use noticeflow_core::result::AppResult;
use noticeflow_entity::form::FormSchema;

use crate::store::FormSchemaStore;

/// Repository for versioned form schemas.
#[derive(Debug, Clone)]
pub struct FormSchemaRepository {
    pool: PgPool,
}

impl FormSchemaRepository {
    /// Create a new form schema repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormSchemaStore for FormSchemaRepository {
    async fn find_active(&self, step_key: &str) -> AppResult<Option<FormSchema>> {
        sqlx::query_as::<_, FormSchema>(
            "SELECT * FROM form_schemas WHERE step_key = $1 AND is_active",
        )
        .bind(step_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find form schema", e))
    }

    async fn list(&self) -> AppResult<Vec<FormSchema>> {
        sqlx::query_as::<_, FormSchema>("SELECT * FROM form_schemas ORDER BY step_key, version")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list form schemas", e))
    }

    async fn publish(&self, step_key: &str, schema_json: &Value) -> AppResult<(FormSchema, bool)> {
        let db_err = |e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to publish form schema", e)
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Serialises concurrent publishers of the same step.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(step_key)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let active = sqlx::query_as::<_, FormSchema>(
            "SELECT * FROM form_schemas WHERE step_key = $1 AND is_active",
        )
        .bind(step_key)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        if let Some(active) = active.filter(|a| &a.schema_json == schema_json) {
            tx.rollback().await.map_err(db_err)?;
            return Ok((active, false));
        }

        sqlx::query("UPDATE form_schemas SET is_active = FALSE, updated_at = NOW() WHERE step_key = $1")
            .bind(step_key)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let created = sqlx::query_as::<_, FormSchema>(
            "INSERT INTO form_schemas (id, step_key, version, is_active, schema_json) \
             SELECT $1, $2, COALESCE(MAX(version), 0) + 1, TRUE, $3 \
             FROM form_schemas WHERE step_key = $2 \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(step_key)
        .bind(schema_json)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        info!(step_key = %step_key, version = created.version, "Published form schema");
        Ok((created, true))
    }
}
