//! NoticeFlow Server: judicial notification workflow API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use noticeflow_core::config::AppConfig;
use noticeflow_core::config::database::DatabaseProvider;
use noticeflow_core::config::logging::LogFormat;
use noticeflow_core::error::AppError;
use noticeflow_database::store::Stores;
use noticeflow_entity::user::UserRole;
use noticeflow_service::{FormService, UserService};

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTICEFLOW_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NoticeFlow v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores (+ migrations for PostgreSQL) ─────────────
    tracing::info!(provider = ?config.database.provider, "Connecting stores...");
    let stores = Stores::connect(&config.database).await?;
    tracing::info!("Stores ready");

    // ── Step 2: Built-in forms ───────────────────────────────────
    // PostgreSQL deployments seed with `noticeflow-cli forms seed`; the
    // memory provider starts empty every time.
    if config.database.provider == DatabaseProvider::Memory {
        let forms = FormService::new(Arc::clone(&stores.forms));
        forms.seed_builtin().await?;
    }

    // ── Step 3: Bootstrap admin ──────────────────────────────────
    if let Some(admin) = &config.auth.bootstrap_admin {
        let users = UserService::new(Arc::clone(&stores.users));
        let created = users
            .ensure_user(&admin.name, &admin.email, &admin.password, UserRole::Admin)
            .await?;
        if created {
            tracing::info!(email = %admin.email, "Bootstrap admin created");
        }
    }

    if config.auth.jwt_secret == "CHANGE_ME_IN_PRODUCTION" {
        tracing::warn!("auth.jwt_secret is the default value; set NOTICEFLOW__AUTH__JWT_SECRET");
    }

    // ── Step 4: HTTP server with graceful shutdown ───────────────
    tracing::info!(
        "Starting HTTP server on {}:{}...",
        config.server.host,
        config.server.port
    );
    noticeflow_api::run_server(config, stores).await
}
