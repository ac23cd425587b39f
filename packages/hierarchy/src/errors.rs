//! Error types for strict mutation validation

use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Node id already present: {0}")]
    DuplicateId(NodeId),

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}
