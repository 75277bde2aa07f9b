//! Route handlers organized by domain.

pub mod auth;
pub mod form;
pub mod health;
pub mod notification;
