//! Embedded schema migrations.

use sqlx::migrate::Migrator;
use tracing::{debug, info};

use noticeflow_core::error::{AppError, ErrorKind};
use noticeflow_core::result::AppResult;

use crate::connection::DatabasePool;

/// Migrations compiled into the binary from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration not yet recorded in `_sqlx_migrations`.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<()> {
    info!(known = MIGRATOR.iter().count(), "Applying database migrations");

    MIGRATOR.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}

/// Version and description of each embedded migration, oldest first.
pub fn embedded_migrations() -> Vec<(i64, String)> {
    MIGRATOR
        .iter()
        .map(|m| {
            debug!(version = m.version, "Embedded migration");
            (m.version, m.description.to_string())
        })
        .collect()
}
