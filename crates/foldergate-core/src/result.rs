//! Convenience result type alias for FolderGate.

use crate::error::AppError;

/// A specialized `Result` type for FolderGate operations.
pub type AppResult<T> = Result<T, AppError>;
