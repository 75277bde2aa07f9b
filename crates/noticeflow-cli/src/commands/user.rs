//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use noticeflow_core::error::AppError;
use noticeflow_core::types::pagination::PageRequest;
use noticeflow_entity::user::UserRole;
use noticeflow_service::UserService;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Role: notifier, reviewer, or admin
        #[arg(short, long, default_value = "notifier")]
        role: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List users
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Active flag
    active: bool,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let stores = super::connect_stores(&config).await?;
    let users = UserService::new(Arc::clone(&stores.users));

    match &args.command {
        UserCommand::Create {
            name,
            email,
            role,
            password,
        } => {
            let role: UserRole = role.parse()?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            let user = users.create_user(name, email, &password, role).await?;
            output::print_success(&format!("Created {} '{}' ({})", user.role, user.email, user.id));
        }
        UserCommand::List { page, per_page } => {
            let result = users
                .list_users(PageRequest::new(*page, *per_page))
                .await?;
            let rows: Vec<UserRow> = result
                .items
                .into_iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    name: u.name,
                    email: u.email,
                    role: u.role.to_string(),
                    active: u.is_active,
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} users)",
                    result.meta.current_page, result.meta.total_pages, result.meta.total_items
                );
            }
        }
    }

    stores.close().await;
    Ok(())
}
