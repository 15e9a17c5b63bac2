use thiserror::Error;

/// Why an online routing attempt produced no usable geometry.
///
/// The orchestrator treats every variant the same way: log it and fall back
/// to the offline pathfinder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote routing timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote routing returned HTTP {0}")]
    Status(u16),

    #[error("malformed routing response: {0}")]
    Malformed(String),

    #[error("remote routing returned no route")]
    EmptyRoute,

    #[error("no remote router configured")]
    Offline,
}
