//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod validated;

pub use auth::AuthUser;
pub use pagination::PaginationParams;
pub use validated::ValidatedJson;
