use scoot_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid selection {0:?}")]
    InvalidSelection(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("ride report error: {0}")]
    Report(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
