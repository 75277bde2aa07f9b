//! Form schema lookup, submission validation, and seeding.

pub mod service;

pub use service::FormService;
