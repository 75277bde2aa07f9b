//! Start the NoticeFlow server.

use std::sync::Arc;

use clap::Args;

use noticeflow_core::config::database::DatabaseProvider;
use noticeflow_core::error::AppError;
use noticeflow_service::FormService;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Require review actions to match the current status
    #[arg(long)]
    pub strict: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = DatabaseProvider::Memory;
    }
    if args.strict {
        config.workflow.enforce_transitions = true;
    }

    println!("Starting NoticeFlow server...");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Provider: {:?}", config.database.provider);
    println!(
        "  Workflow: {}",
        if config.workflow.enforce_transitions {
            "strict"
        } else {
            "permissive"
        }
    );

    let stores = super::connect_stores(&config).await?;
    if config.database.provider == DatabaseProvider::Memory {
        FormService::new(Arc::clone(&stores.forms))
            .seed_builtin()
            .await?;
    }

    noticeflow_api::run_server(config, stores).await
}
