//! # Tree Mutations
//!
//! Pure operations on a [`Forest`]: each takes the current forest by
//! reference and returns a new one. The input is never touched; untouched
//! entries are shared between the two.
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Appends under the parent matching by id, at any depth, or as a new root
//! - Absent parent or an id already present: forest unchanged
//!
//! ### Update
//! - Replaces fields in place; children and sibling position are kept
//! - A rename carries over to the children's `parent_name`
//! - Absent target: forest unchanged
//!
//! ### Delete
//! - Removes the node and all descendants, wherever it sits
//! - Absent target: forest unchanged
//!
//! Strictness is opt-in through [`Mutation::validate`].

use crate::{Forest, MutationError, NodeEntry, NodeId, Record};
use serde::{Deserialize, Serialize};

/// Fields an update may change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NodeUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Tree operations as data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a confirmed record under `parent_id` (or as a root)
    #[serde(rename_all = "camelCase")]
    Insert {
        parent_id: Option<NodeId>,
        node: Record,
    },

    /// Change fields of an existing node
    #[serde(rename_all = "camelCase")]
    Update { target_id: NodeId, fields: NodeUpdate },

    /// Remove a node and its subtree
    #[serde(rename_all = "camelCase")]
    Delete { target_id: NodeId },
}

impl Mutation {
    /// Apply leniently: a missing target yields an equal forest
    pub fn apply(&self, forest: &Forest) -> Forest {
        match self {
            Mutation::Insert { parent_id, node } => insert(forest, parent_id.as_ref(), node),
            Mutation::Update { target_id, fields } => update(forest, target_id, fields),
            Mutation::Delete { target_id } => delete(forest, target_id),
        }
    }

    /// Validate without applying
    pub fn validate(&self, forest: &Forest) -> Result<(), MutationError> {
        match self {
            Mutation::Insert { parent_id, node } => {
                if node.name.is_empty() {
                    return Err(MutationError::InvalidNode("name is empty".to_string()));
                }
                if forest.contains(&node.id) {
                    return Err(MutationError::DuplicateId(node.id.clone()));
                }
                match parent_id {
                    Some(parent) if !forest.contains(parent) => {
                        Err(MutationError::ParentNotFound(parent.clone()))
                    }
                    _ => Ok(()),
                }
            }

            Mutation::Update { target_id, fields } => {
                if !forest.contains(target_id) {
                    return Err(MutationError::NodeNotFound(target_id.clone()));
                }
                if fields.name.as_deref() == Some("") {
                    return Err(MutationError::InvalidNode("name is empty".to_string()));
                }
                Ok(())
            }

            Mutation::Delete { target_id } => {
                if forest.contains(target_id) {
                    Ok(())
                } else {
                    Err(MutationError::NodeNotFound(target_id.clone()))
                }
            }
        }
    }

    /// Id of the node this mutation is about
    pub fn target(&self) -> &NodeId {
        match self {
            Mutation::Insert { node, .. } => &node.id,
            Mutation::Update { target_id, .. } | Mutation::Delete { target_id } => target_id,
        }
    }
}

/// Append `node` as the last child of `parent`, or as the last root
pub fn insert(forest: &Forest, parent: Option<&NodeId>, node: &Record) -> Forest {
    if forest.contains(&node.id) {
        return forest.clone();
    }

    let mut next = forest.clone();

    match parent {
        Some(parent_id) => {
            let Some(parent_entry) = next.entry_mut(parent_id) else {
                return forest.clone();
            };
            parent_entry.children.push(node.id.clone());
            let parent_name = parent_entry.name.clone();

            next.put(NodeEntry {
                id: node.id.clone(),
                name: node.name.clone(),
                parent_name: Some(parent_name),
                parent: Some(parent_id.clone()),
                children: Vec::new(),
            });
        }
        None => {
            next.put(NodeEntry {
                id: node.id.clone(),
                name: node.name.clone(),
                parent_name: None,
                parent: None,
                children: Vec::new(),
            });
            next.push_root(node.id.clone());
        }
    }

    next
}

/// Replace the fields of `target`, keeping its children and position
pub fn update(forest: &Forest, target: &NodeId, fields: &NodeUpdate) -> Forest {
    let mut next = forest.clone();

    let Some(entry) = next.entry_mut(target) else {
        return next;
    };

    let Some(name) = fields.name.clone() else {
        return next;
    };

    entry.name = name.clone();
    let children = entry.children.clone();

    for child in &children {
        if let Some(child_entry) = next.entry_mut(child) {
            child_entry.parent_name = Some(name.clone());
        }
    }

    next
}

/// Remove `target` and its whole subtree
pub fn delete(forest: &Forest, target: &NodeId) -> Forest {
    let mut next = forest.clone();

    let Some(entry) = forest.get(target) else {
        return next;
    };

    match &entry.parent {
        Some(parent_id) => {
            if let Some(parent_entry) = next.entry_mut(parent_id) {
                parent_entry.children.retain(|child| child != target);
            }
        }
        None => next.retain_roots(|root| root != target),
    }

    for id in forest.subtree_ids(target) {
        next.remove(&id);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_forest;

    fn abc() -> Forest {
        build_forest(&[
            Record::new("a", "A"),
            Record::new("b", "B").with_parent_name("A"),
            Record::new("c", "C").with_parent_name("B"),
        ])
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Update {
            target_id: "b".into(),
            fields: NodeUpdate::rename("B2"),
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["targetId"], "b");
        assert_eq!(json["fields"]["name"], "B2");

        let back: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(back, mutation);
    }

    #[test]
    fn test_insert_shares_untouched_entries() {
        let forest = abc();
        let next = insert(&forest, Some(&"a".into()), &Record::new("d", "D"));

        assert!(Forest::shares_entry(&forest, &next, &"c".into()));
        assert!(!Forest::shares_entry(&forest, &next, &"a".into()));
        assert_eq!(forest.children_of(&"a".into()).len(), 1);
        assert_eq!(next.children_of(&"a".into()).len(), 2);
    }

    #[test]
    fn test_insert_sets_parent_links() {
        let next = insert(&abc(), Some(&"c".into()), &Record::new("d", "D"));
        let d = next.get(&"d".into()).unwrap();
        assert_eq!(d.parent, Some(NodeId::from("c")));
        assert_eq!(d.parent_name.as_deref(), Some("C"));
    }

    #[test]
    fn test_insert_existing_id_is_noop() {
        let forest = abc();
        let next = insert(&forest, None, &Record::new("b", "Again"));
        assert_eq!(next, forest);
    }

    #[test]
    fn test_update_without_name_is_noop() {
        let forest = abc();
        assert_eq!(update(&forest, &"b".into(), &NodeUpdate::default()), forest);
    }

    #[test]
    fn test_rename_updates_child_parent_name() {
        let next = update(&abc(), &"b".into(), &NodeUpdate::rename("B2"));
        assert_eq!(next.get(&"c".into()).unwrap().parent_name.as_deref(), Some("B2"));
    }

    #[test]
    fn test_delete_root() {
        let next = delete(&abc(), &"a".into());
        assert!(next.is_empty());
        assert!(next.roots().is_empty());
    }

    #[test]
    fn test_validate() {
        let forest = abc();

        let dup = Mutation::Insert {
            parent_id: None,
            node: Record::new("a", "X"),
        };
        assert_eq!(dup.validate(&forest), Err(MutationError::DuplicateId("a".into())));

        let orphan = Mutation::Insert {
            parent_id: Some("ghost".into()),
            node: Record::new("x", "X"),
        };
        assert_eq!(
            orphan.validate(&forest),
            Err(MutationError::ParentNotFound("ghost".into()))
        );

        let missing = Mutation::Delete {
            target_id: "zz".into(),
        };
        assert_eq!(missing.validate(&forest), Err(MutationError::NodeNotFound("zz".into())));
        assert_eq!(missing.apply(&forest), forest);

        let blank = Mutation::Update {
            target_id: "a".into(),
            fields: NodeUpdate::rename(""),
        };
        assert!(matches!(blank.validate(&forest), Err(MutationError::InvalidNode(_))));
    }
}
