//! Convenience result type alias for Docstore.

use crate::error::AppError;

/// A specialized `Result` type for Docstore operations.
pub type AppResult<T> = Result<T, AppError>;
