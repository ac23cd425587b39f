//! Error types for the sync layer

use orgtree_hierarchy::NodeId;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures talking to a document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "firestore")]
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    NotFound(NodeId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Field-level form messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.parent_name.is_none() && self.child_name.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [&self.parent_name, &self.child_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Why a session operation did not complete
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Remote error: {0}")]
    Remote(#[from] StoreError),

    #[error("No node selected for update")]
    NoEditTarget,

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

impl SyncError {
    /// Remote failures may succeed on a retry; the rest need user input
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Remote(_))
    }
}
