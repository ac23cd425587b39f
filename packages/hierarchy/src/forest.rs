//! # Forest Arena
//!
//! A forest is an id-addressed table of node entries plus the ordered list
//! of root ids. Each entry owns its ordered child-id list; the nested view
//! with breadcrumbs is produced by [`crate::breadcrumb`].
//!
//! Entries sit behind `Arc`, so cloning a forest copies pointers only and a
//! mutation clones just the entries it touches (`Arc::make_mut`).

use crate::NodeId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One node in the arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEntry {
    pub id: NodeId,

    pub name: String,

    /// Display name of the parent (None for roots)
    pub parent_name: Option<String>,

    /// Resolved parent link (None for roots)
    pub parent: Option<NodeId>,

    /// Child ids in insertion order
    pub children: Vec<NodeId>,
}

/// Ordered collection of root trees, stored as an arena
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    entries: HashMap<NodeId, Arc<NodeEntry>>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes across all trees
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: &NodeId) -> Option<&NodeEntry> {
        self.entries.get(id).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Child ids of `id`, empty when the node is unknown or a leaf
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.get(id)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeEntry> {
        self.get(id)
            .and_then(|entry| entry.parent.as_ref())
            .and_then(|parent| self.get(parent))
    }

    /// Ancestors of `id` ordered root first, excluding the node itself
    pub fn ancestors(&self, id: &NodeId) -> Vec<&NodeEntry> {
        let mut chain = Vec::new();
        let mut cursor = self.parent_of(id);

        while let Some(entry) = cursor {
            chain.push(entry);
            cursor = self.parent_of(&entry.id);
        }

        chain.reverse();
        chain
    }

    /// Ids of the subtree rooted at `id` (pre-order, including `id`)
    pub fn subtree_ids(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }

        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            for child in self.children_of(&current).iter().rev() {
                stack.push(child.clone());
            }
            out.push(current);
        }

        out
    }

    /// Every node in pre-order, roots in order
    pub fn iter_depth_first(&self) -> Vec<&NodeEntry> {
        self.roots
            .iter()
            .flat_map(|root| self.subtree_ids(root))
            .filter_map(|id| self.get(&id))
            .collect()
    }

    /// True when `a` and `b` share the same entry allocation
    pub fn shares_entry(a: &Forest, b: &Forest, id: &NodeId) -> bool {
        match (a.entries.get(id), b.entries.get(id)) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }

    pub(crate) fn put(&mut self, entry: NodeEntry) {
        self.entries.insert(entry.id.clone(), Arc::new(entry));
    }

    pub(crate) fn entry_mut(&mut self, id: &NodeId) -> Option<&mut NodeEntry> {
        self.entries.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn remove(&mut self, id: &NodeId) -> Option<Arc<NodeEntry>> {
        self.entries.remove(id)
    }

    pub(crate) fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub(crate) fn retain_roots(&mut self, keep: impl FnMut(&NodeId) -> bool) {
        self.roots.retain(keep);
    }
}
