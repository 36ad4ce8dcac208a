//! Training screen error types

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingError {
    #[error("Upload images first to train the model")]
    NoImages,

    #[error("Training is already in progress")]
    AlreadyRunning,

    #[error("Training already completed; reset to train another model")]
    AlreadyCompleted,
}

/// Result type alias for training screen operations
pub type TrainingResult<T> = Result<T, TrainingError>;
