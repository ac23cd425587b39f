//! # Breadcrumb Annotator
//!
//! Produces the nested [`Node`] view of a forest with each node's display
//! path filled in. Nothing here is cached: the view is rebuilt from the arena
//! every time it is rendered, so breadcrumbs always follow current names.

use crate::{Forest, NodeId};
use serde::Serialize;

pub const SEPARATOR: &str = " -> ";

/// Nested, render-ready node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent_name: Option<String>,
    pub breadcrumb: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Pre-order walk over this node and its descendants
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Extend `parent_path` with `name`. An empty parent path yields `name`.
pub fn compose(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{parent_path}{SEPARATOR}{name}")
    }
}

/// Annotate the subtree rooted at `id`, given its parent's breadcrumb
pub fn annotate(forest: &Forest, id: &NodeId, parent_path: &str) -> Option<Node> {
    let entry = forest.get(id)?;
    let breadcrumb = compose(parent_path, &entry.name);

    let children = entry
        .children
        .iter()
        .filter_map(|child| annotate(forest, child, &breadcrumb))
        .collect();

    Some(Node {
        id: entry.id.clone(),
        name: entry.name.clone(),
        parent_name: entry.parent_name.clone(),
        breadcrumb,
        children,
    })
}

pub fn annotate_forest(forest: &Forest) -> Vec<Node> {
    forest
        .roots()
        .iter()
        .filter_map(|root| annotate(forest, root, ""))
        .collect()
}

/// Breadcrumb of a single node, computed by walking its ancestors
pub fn breadcrumb_of(forest: &Forest, id: &NodeId) -> Option<String> {
    let entry = forest.get(id)?;
    let path = forest
        .ancestors(id)
        .into_iter()
        .fold(String::new(), |path, ancestor| compose(&path, &ancestor.name));

    Some(compose(&path, &entry.name))
}
