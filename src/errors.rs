//! Provides the error type used throughout this crate.

use crate::composite::NodeId;
use thiserror::Error;

/// The error type used throughout this crate.
///
/// All variants signal programmer misuse. They are returned immediately and
/// never retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    // Composite errors
    #[error("Operation `{operation}` is not supported by a {variant} node")]
    UnsupportedOperation {
        operation: &'static str,
        variant: &'static str,
    },
    #[error("Node not in tree: {0}")]
    UnknownNode(NodeId),
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("Node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),
    #[error("Adding {child} to {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },
    // Demo selection
    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),
    // Memento errors
    #[error("No snapshot left to restore")]
    EmptyHistory,
}
