//! Route definitions for the NoticeFlow HTTP API.
//!
//! Routes are grouped by domain and merged at the root. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes())
        .merge(notification_routes())
        .merge(form_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: sign-in, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", post(handlers::auth::sign_in))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Notification lifecycle
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification)
                .put(handlers::notification::update_notification),
        )
        .route(
            "/notifications/person",
            post(handlers::notification::create_person)
                .put(handlers::notification::update_person),
        )
        .route(
            "/notifications/review",
            post(handlers::notification::review_notification),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification),
        )
}

/// Dynamic form schemas
fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/forms/{step_key}", get(handlers::form::get_form))
        .route(
            "/forms/{step_key}/validate",
            post(handlers::form::validate_form),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
