//! Sign-in and token authentication.

pub mod service;

pub use service::{AuthService, SignInResult};
