//! Spatial-subsystem error type.

use thiserror::Error;

use nav_core::NodeId;

/// Errors produced by `nav-spatial`.
///
/// Search errors never escape [`Pathfinder::plan`][crate::Pathfinder::plan];
/// they are logged and replaced with a direct-line route.  Loader errors do
/// reach the caller, since a malformed topology file is a deployment fault.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in topology")]
    NodeNotFound(NodeId),

    #[error("edge references unknown node {0:?}")]
    UnknownNode(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
