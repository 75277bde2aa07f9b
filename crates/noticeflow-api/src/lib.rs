//! # noticeflow-api
//!
//! HTTP API layer for NoticeFlow built on Axum.
//!
//! Provides the REST endpoints, extractors (access token, validated JSON,
//! pagination), DTOs, middleware (CORS, request logging), and the mapping
//! from `AppError` to the response envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
