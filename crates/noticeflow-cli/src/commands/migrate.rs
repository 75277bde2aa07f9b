//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use noticeflow_core::error::AppError;
use noticeflow_database::connection::DatabasePool;
use noticeflow_database::migration::{embedded_migrations, run_migrations};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// List the migrations compiled into this binary
    List,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            let config = super::load_config(env)?;
            let db = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            run_migrations(&db).await?;
            db.close().await;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::List => {
            for (version, description) in embedded_migrations() {
                output::print_kv(&version.to_string(), &description);
            }
        }
    }

    Ok(())
}
