//! User provisioning.

pub mod service;

pub use service::UserService;
