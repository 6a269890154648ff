//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` impls or wrap it as one variant.

use thiserror::Error;

/// Errors producible by the core types themselves.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("city area must be positive, got {0} km²")]
    InvalidZoneArea(f64),

    #[error("unknown vehicle status code {0}")]
    UnknownStatusCode(u8),

    #[error("unknown station kind code {0}")]
    UnknownStationKind(u8),
}

/// Shorthand result type for all `scoot-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
