//! Engine-wide error type.
//!
//! Sub-crates define their own error enums (`SpatialError`, `RemoteError`,
//! `OutputError`); `NavError` covers configuration and shared parsing.

use thiserror::Error;

/// The top-level error type for `nav-core`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `nav-core`.
pub type NavResult<T> = Result<T, NavError>;
