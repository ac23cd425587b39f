//! UI boundary types: what a front end can ask for and what it gets back

use crate::form::FormState;
use orgtree_hierarchy::{Node, NodeId};
use serde::{Deserialize, Serialize};

/// User actions a front end forwards to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    Load,

    /// "+" on a node: the next save attaches under it
    #[serde(rename_all = "camelCase")]
    AddChild { parent_id: NodeId },

    /// Reset to adding a new root
    AddRoot,

    /// Pencil on a node: switch the form to update mode
    #[serde(rename_all = "camelCase")]
    Edit { node_id: NodeId },

    SetChildName { name: String },

    /// The Save/Update button
    Submit,

    Cancel,

    #[serde(rename_all = "camelCase")]
    Delete { node_id: NodeId },
}

/// Terminal success state of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SyncOutcome {
    Loaded { nodes: usize, dropped: usize },
    Inserted { id: NodeId },
    Updated { id: NodeId },
    Deleted { id: NodeId, removed: usize },
    FormChanged,
}

/// Everything a front end needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub form: FormState,
    pub tree: Vec<Node>,
    pub version: u64,
}

impl SessionView {
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_json() {
        let intent: Intent =
            serde_json::from_str(r#"{ "type": "addChild", "parentId": "doc-1" }"#).unwrap();
        assert_eq!(
            intent,
            Intent::AddChild {
                parent_id: "doc-1".into()
            }
        );

        let submit: Intent = serde_json::from_str(r#"{ "type": "submit" }"#).unwrap();
        assert_eq!(submit, Intent::Submit);
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_value(SyncOutcome::Deleted {
            id: "doc-2".into(),
            removed: 3,
        })
        .unwrap();
        assert_eq!(json["type"], "deleted");
        assert_eq!(json["removed"], 3);
    }
}
