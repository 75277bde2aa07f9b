//! Form schema management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use noticeflow_core::error::AppError;
use noticeflow_service::FormService;

/// Arguments for form commands
#[derive(Debug, Args)]
pub struct FormsArgs {
    /// Forms subcommand
    #[command(subcommand)]
    pub command: FormsCommand,
}

/// Forms subcommands
#[derive(Debug, Subcommand)]
pub enum FormsCommand {
    /// Publish the built-in forms, creating a new version where they changed
    Seed,
    /// List every stored form version
    List,
}

/// Form version row for table output
#[derive(Debug, Serialize, Tabled)]
struct FormRow {
    /// Step key
    step_key: String,
    /// Version
    version: i32,
    /// Active flag
    active: bool,
    /// Created at
    created_at: String,
}

/// Execute form commands
pub async fn execute(args: &FormsArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let stores = super::connect_stores(&config).await?;
    let forms = FormService::new(Arc::clone(&stores.forms));

    match &args.command {
        FormsCommand::Seed => {
            let created = forms.seed_builtin().await?;
            if created == 0 {
                output::print_warning("Built-in forms are already up to date.");
            } else {
                output::print_success(&format!("Published {created} form version(s)."));
            }
        }
        FormsCommand::List => {
            let rows: Vec<FormRow> = forms
                .list_versions()
                .await?
                .into_iter()
                .map(|f| FormRow {
                    step_key: f.step_key,
                    version: f.version,
                    active: f.is_active,
                    created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    stores.close().await;
    Ok(())
}
