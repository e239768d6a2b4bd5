//! Error types for pipeline construction and batch workers

use papersift_filters::ConfigError;
use thiserror::Error;

/// Errors that can occur while assembling or running a pipeline
///
/// Individual papers never produce an error; a paper that cannot be
/// processed is skipped and reported in [`crate::BatchOutcome`].
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Domain configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A stage with this name is already registered
    #[error("Duplicate stage name: {0}")]
    DuplicateStage(String),

    /// Stage name is empty or reserved
    #[error("Invalid stage name: {0:?}")]
    InvalidStage(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
