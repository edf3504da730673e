//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` or keep it as one variant.

use thiserror::Error;

/// Errors raised while validating core value types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid distribution: {0}")]
    Distribution(String),

    #[error("tick duration must be positive")]
    ZeroTickDuration,
}

/// Shorthand result type for `ck-core`.
pub type CoreResult<T> = Result<T, CoreError>;
