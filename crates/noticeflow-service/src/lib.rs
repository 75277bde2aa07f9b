//! # noticeflow-service
//!
//! Business logic service layer for NoticeFlow. Each service orchestrates
//! the stores and credential primitives to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod form;
pub mod notification;
pub mod user;

pub use auth::{AuthService, SignInResult};
pub use context::RequestContext;
pub use form::FormService;
pub use notification::{
    NotificationService, NotificationSnapshot, NotificationView, TransitionClient,
    TransitionOutcome, TransitionPresenter, WorkflowPolicy,
};
pub use user::UserService;
