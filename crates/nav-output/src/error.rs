//! Error types for nav-output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
