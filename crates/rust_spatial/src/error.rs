//! Crate-wide error type

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by spatial operations
#[derive(Error, Debug)]
pub enum SpatialError {
    /// A direction, axis or up vector had (near) zero length, or the up vector
    /// was parallel to the view direction
    #[error("Degenerate vector: {0}")]
    ZeroVector(&'static str),

    /// A matrix that had to be inverted was singular
    #[error("Matrix is not invertible: {0}")]
    SingularMatrix(&'static str),

    /// Scene graph handle does not refer to a live node
    #[error("Scene node not found")]
    NodeNotFound,

    /// The supplied old parent does not list the node as a child
    #[error("Node is not a child of the given parent")]
    NotAChild,

    /// The node already has a parent, which must be named to move or remove it
    #[error("Node already has a parent")]
    NotARoot,

    /// Re-parenting would make a node its own ancestor
    #[error("Re-parenting would create a cycle")]
    CycleDetected,

    /// Configuration failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SpatialError>;
