use crate::acquire::AcquireError;
use crate::clipboard::ClipboardError;
use crate::preview::PreviewError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("{0}")]
    Usage(String),
}
