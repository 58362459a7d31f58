//! Convenience result type alias for HookMock.

use crate::error::AppError;

/// A specialized `Result` type for HookMock operations.
pub type AppResult<T> = Result<T, AppError>;
