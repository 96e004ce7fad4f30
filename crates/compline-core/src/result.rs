//! Convenience result type alias for Compline.

use crate::error::AppError;

/// A specialized `Result` type for Compline operations.
pub type AppResult<T> = Result<T, AppError>;
