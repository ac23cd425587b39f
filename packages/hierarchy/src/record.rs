//! Flat records as they live in the document store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned, immutable identifier of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One hierarchy entry as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: NodeId,

    pub name: String,

    /// Display name of the parent. Empty strings mean "no parent".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,

    /// Parent identifier, written by orgtree on create. Authoritative when it resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    /// Breadcrumb stored alongside the document at write time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_name: None,
            parent_id: None,
            breadcrumb: None,
        }
    }

    pub fn with_parent_name(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_name = Some(parent_name.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Parent name, treating `""` the same as absent
    pub fn declared_parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref().filter(|name| !name.is_empty())
    }

    /// True when the record declares any parent at all
    pub fn has_declared_parent(&self) -> bool {
        self.parent_id.is_some() || self.declared_parent_name().is_some()
    }
}

/// Writable part of a record (everything but the id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<String>,
}

impl RecordFields {
    pub fn into_record(self, id: impl Into<NodeId>) -> Record {
        Record {
            id: id.into(),
            name: self.name,
            parent_name: self.parent_name,
            parent_id: self.parent_id,
            breadcrumb: self.breadcrumb,
        }
    }
}
