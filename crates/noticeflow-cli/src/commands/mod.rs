//! CLI command definitions and dispatch.

pub mod forms;
pub mod migrate;
pub mod notification;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use noticeflow_core::config::AppConfig;
use noticeflow_core::error::AppError;
use noticeflow_database::store::Stores;

/// NoticeFlow: judicial notification workflow
#[derive(Debug, Parser)]
#[command(name = "noticeflow", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/default + config/{env})
    #[arg(short, long, env = "NOTICEFLOW_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the NoticeFlow server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Form schema management
    Forms(forms::FormsArgs),
    /// User management
    User(user::UserArgs),
    /// Inspect and review notifications through the HTTP API
    Notification(notification::NotificationArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Forms(args) => forms::execute(args, &self.env, self.format).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
            Commands::Notification(args) => notification::execute(args, self.format).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: connect the configured stores
pub async fn connect_stores(config: &AppConfig) -> Result<Stores, AppError> {
    Stores::connect(&config.database).await
}
