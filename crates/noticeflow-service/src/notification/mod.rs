//! Notification lifecycle: CRUD, the transition authority, and the
//! client-side transition presenter.

pub mod presenter;
pub mod service;
pub mod workflow;

pub use presenter::{
    NotificationSnapshot, TransitionClient, TransitionOutcome, TransitionPresenter,
    available_actions,
};
pub use service::{NewNotification, NotificationService, NotificationView, parse_hearing_date};
pub use workflow::WorkflowPolicy;
