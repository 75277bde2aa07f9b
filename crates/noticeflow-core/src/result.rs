//! Convenience result type alias for NoticeFlow.

use crate::error::AppError;

/// A specialized `Result` type for NoticeFlow operations.
pub type AppResult<T> = Result<T, AppError>;
