//! Convenience result type alias for SaveMe.

use crate::error::AppError;

/// A specialized `Result` type for SaveMe operations.
pub type AppResult<T> = Result<T, AppError>;
