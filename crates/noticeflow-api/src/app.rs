//! Application builder: wires state and router into an Axum app and runs it.

use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use noticeflow_core::config::AppConfig;
use noticeflow_core::error::AppError;
use noticeflow_database::store::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over the given stores.
pub fn build_app(config: AppConfig, stores: Stores) -> Router {
    build_router(AppState::new(config, stores))
}

/// Serves the API until Ctrl+C or SIGTERM, then drains open connections
/// for up to `server.shutdown_grace_seconds` and closes the stores.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(config, stores.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("NoticeFlow server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            stores.close().await;
            return flatten(result);
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
    let _ = shutdown_tx.send(true);

    let outcome = match tokio::time::timeout(grace, server).await {
        Ok(result) => flatten(result),
        Err(_) => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
            Ok(())
        }
    };

    stores.close().await;
    tracing::info!("NoticeFlow server shut down");
    outcome
}

fn flatten(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
