//! Notification inspection and review through a running server.

use clap::{Args, Subcommand};
use tracing::info;
use uuid::Uuid;

use crate::client::HttpTransitionClient;
use crate::output::{self, OutputFormat};
use noticeflow_core::error::AppError;
use noticeflow_entity::notification::ReviewAction;
use noticeflow_service::{TransitionOutcome, TransitionPresenter};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Server base URL
    #[arg(long, env = "NOTICEFLOW_URL", default_value = "http://localhost:3333")]
    pub url: String,

    /// Access token from `POST /auth/signin`
    #[arg(long, env = "NOTICEFLOW_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Show a notification and the actions available to you
    Show {
        /// Notification ID
        id: Uuid,
    },
    /// Apply a review action; prompts when no action is given
    Review {
        /// Notification ID
        id: Uuid,
        /// approve, back or validate
        #[arg(short, long)]
        action: Option<String>,
    },
}

/// Execute notification commands
pub async fn execute(args: &NotificationArgs, format: OutputFormat) -> Result<(), AppError> {
    let client = HttpTransitionClient::new(&args.url, &args.token);

    match &args.command {
        NotificationCommand::Show { id } => {
            let notification = client.notification(*id).await?;
            if format == OutputFormat::Json {
                output::print_json(&notification);
                return Ok(());
            }

            output::print_kv("ID", &notification.id.to_string());
            output::print_kv("Title", &notification.title);
            output::print_kv("Status", notification.status.as_str());
            output::print_kv(
                "Hearing date",
                &notification.hearing_date.format("%Y-%m-%d").to_string(),
            );
            output::print_kv(
                "Notified person",
                notification
                    .notified_person
                    .as_ref()
                    .map(|p| p.name.as_str())
                    .unwrap_or("-"),
            );
            let actions = notification.available_actions.unwrap_or_default();
            output::print_kv("Actions", &join_actions(&actions));
        }
        NotificationCommand::Review { id, action } => {
            let me = client.me().await?;
            let presenter = TransitionPresenter::new(client, *id, me.role);
            let before = presenter.refresh().await?;

            let offered = presenter.actions().await;
            let action = match action {
                Some(a) => a.parse::<ReviewAction>()?,
                None => prompt_action(&offered)?,
            };

            match presenter.trigger(action).await {
                TransitionOutcome::Applied => {
                    let status = presenter
                        .snapshot()
                        .await
                        .map(|s| s.status)
                        .unwrap_or(action.target_status());
                    info!(notification_id = %id, action = %action, to = %status, "Review applied");
                    output::print_success(&format!(
                        "'{}' moved from {} to {}",
                        before.title, before.status, status
                    ));
                    if !presenter.in_view().await {
                        output::print_warning("The notification is no longer visible to you.");
                    }
                }
                TransitionOutcome::Rejected(e) => return Err(e),
                TransitionOutcome::Busy => {
                    output::print_warning("Another action is still in flight.");
                }
            }
        }
    }

    Ok(())
}

fn join_actions(actions: &[ReviewAction]) -> String {
    if actions.is_empty() {
        return "none".to_string();
    }
    actions
        .iter()
        .map(ReviewAction::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn prompt_action(offered: &[ReviewAction]) -> Result<ReviewAction, AppError> {
    if offered.is_empty() {
        return Err(AppError::validation(
            "No review actions are available for this notification",
        ));
    }

    let labels: Vec<&str> = offered.iter().map(ReviewAction::as_str).collect();
    let index = dialoguer::Select::new()
        .with_prompt("Action")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    Ok(offered[index])
}
