//! Notification domain entities.

pub mod action;
pub mod model;
pub mod status;

pub use action::ReviewAction;
pub use model::{CreateNotification, Notification, NotificationDetails, UpdateNotification};
pub use status::NotificationStatus;
