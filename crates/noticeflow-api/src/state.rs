//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use noticeflow_auth::jwt::decoder::JwtDecoder;
use noticeflow_auth::jwt::encoder::JwtEncoder;
use noticeflow_core::config::AppConfig;
use noticeflow_database::store::Stores;
use noticeflow_service::{
    AuthService, FormService, NotificationService, UserService, WorkflowPolicy,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Stores for the configured provider
    pub stores: Stores,

    // ── Services ─────────────────────────────────────────────
    /// Sign-in and token validation
    pub auth_service: Arc<AuthService>,
    /// User provisioning
    pub user_service: Arc<UserService>,
    /// Notification lifecycle
    pub notification_service: Arc<NotificationService>,
    /// Form schemas
    pub form_service: Arc<FormService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            jwt_encoder,
            jwt_decoder,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&stores.notifications),
            WorkflowPolicy::from_config(&config.workflow),
            config.workflow.page_size,
        ));
        let form_service = Arc::new(FormService::new(Arc::clone(&stores.forms)));

        Self {
            config: Arc::new(config),
            stores,
            auth_service,
            user_service,
            notification_service,
            form_service,
        }
    }
}
