use scoot_core::CoreError;
use thiserror::Error;

/// Errors surfaced by directory calls.
///
/// `Http`/`Json`/`Api` carry transport-level causes; `NotFound` is the
/// service's well-formed "no such record" answer; `Core` wraps a payload
/// that decoded but carried an out-of-vocabulary code or invalid figure.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("directory response was not valid JSON: {0}")]
    Json(#[source] reqwest::Error),

    #[error("directory API error: {0}")]
    Api(String),

    #[error("no record for the requested id")]
    NotFound,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
