//! # Hierarchy Builder
//!
//! Converts the flat record list into a [`Forest`].
//!
//! ## Linking rules
//!
//! - A record with a `parentId` is linked by id only. If that id is gone
//!   the record is an orphan, even when another record has the parent's name.
//! - A record without a `parentId` resolves a non-empty `parentName` to the
//!   id of the **last** record carrying that name.
//! - A record with no declared parent becomes a root.
//! - A record whose declared parent cannot be resolved is an orphan and is
//!   dropped. It is never promoted to a root.
//! - Anything not reachable from a root (descendants of orphans, parent
//!   cycles) is dropped as well.
//!
//! Records are never merged: two records with the same name are two nodes.

use crate::{Forest, NodeEntry, NodeId, Record};
use std::collections::{HashMap, HashSet};

/// A record whose declared parent does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub id: NodeId,
    /// The parent reference that failed to resolve (id or name)
    pub missing_parent: String,
}

/// What the builder dropped or had to guess about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub orphans: Vec<Orphan>,

    /// Linked to a parent, but no root above them (orphan subtrees, cycles)
    pub unreachable: Vec<NodeId>,

    /// Records skipped because their name is empty
    pub nameless: Vec<NodeId>,

    /// Records skipped because an earlier record already used the id
    pub duplicate_ids: Vec<NodeId>,

    /// Names carried by more than one record, in first-seen order
    pub ambiguous_names: Vec<String>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
            && self.unreachable.is_empty()
            && self.nameless.is_empty()
            && self.duplicate_ids.is_empty()
            && self.ambiguous_names.is_empty()
    }

    /// Number of records that did not make it into the forest
    pub fn dropped(&self) -> usize {
        self.orphans.len() + self.unreachable.len() + self.nameless.len() + self.duplicate_ids.len()
    }
}

pub fn build_forest(records: &[Record]) -> Forest {
    build_forest_with_report(records).0
}

pub fn build_forest_with_report(records: &[Record]) -> (Forest, BuildReport) {
    let mut report = BuildReport::default();

    // Pass 1: index accepted records by id and by name
    let mut accepted: Vec<&Record> = Vec::with_capacity(records.len());
    let mut by_id: HashMap<&NodeId, &Record> = HashMap::with_capacity(records.len());
    let mut by_name: HashMap<&str, &NodeId> = HashMap::with_capacity(records.len());

    for record in records {
        if record.name.is_empty() {
            report.nameless.push(record.id.clone());
            continue;
        }
        if by_id.contains_key(&record.id) {
            report.duplicate_ids.push(record.id.clone());
            continue;
        }

        by_id.insert(&record.id, record);
        if by_name.insert(record.name.as_str(), &record.id).is_some()
            && !report.ambiguous_names.contains(&record.name)
        {
            report.ambiguous_names.push(record.name.clone());
        }
        accepted.push(record);
    }

    // Pass 2: resolve parents and collect child lists in record order
    let mut roots: Vec<&NodeId> = Vec::new();
    let mut children: HashMap<&NodeId, Vec<NodeId>> = HashMap::new();
    let mut parents: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut orphaned: HashSet<&NodeId> = HashSet::new();

    for &record in &accepted {
        if !record.has_declared_parent() {
            roots.push(&record.id);
            continue;
        }

        match resolve_parent(record, &by_id, &by_name) {
            Some(parent) => {
                children.entry(parent).or_default().push(record.id.clone());
                parents.insert(&record.id, parent);
            }
            None => {
                let missing_parent = record
                    .parent_id
                    .as_ref()
                    .map(NodeId::to_string)
                    .or_else(|| record.declared_parent_name().map(str::to_string))
                    .unwrap_or_default();
                report.orphans.push(Orphan {
                    id: record.id.clone(),
                    missing_parent,
                });
                orphaned.insert(&record.id);
            }
        }
    }

    // Pass 3: keep only what hangs off a root
    let mut forest = Forest::new();
    let mut stack: Vec<&NodeId> = roots.iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        let record = by_id[id];
        let kids = children.remove(id).unwrap_or_default();
        let parent = parents.get(id).map(|p| (*p).clone());
        let parent_name = parent.as_ref().map(|p| by_id[p].name.clone());

        for kid in kids.iter().rev() {
            if let Some((key, _)) = by_id.get_key_value(kid) {
                stack.push(*key);
            }
        }

        forest.put(NodeEntry {
            id: id.clone(),
            name: record.name.clone(),
            parent_name,
            parent,
            children: kids,
        });
    }

    for root in roots {
        forest.push_root(root.clone());
    }

    for &record in &accepted {
        if !forest.contains(&record.id) && !orphaned.contains(&record.id) {
            report.unreachable.push(record.id.clone());
        }
    }

    (forest, report)
}

fn resolve_parent<'a>(
    record: &Record,
    by_id: &HashMap<&'a NodeId, &'a Record>,
    by_name: &HashMap<&'a str, &'a NodeId>,
) -> Option<&'a NodeId> {
    let by_parent_id = record
        .parent_id
        .as_ref()
        .and_then(|pid| by_id.get_key_value(pid))
        .map(|(key, _)| *key);

    // A set parentId is authoritative; the name is only consulted without one
    let parent = match &record.parent_id {
        Some(_) => by_parent_id,
        None => record
            .declared_parent_name()
            .and_then(|name| by_name.get(name).copied()),
    }?;

    // A record cannot parent itself
    (parent != &record.id).then_some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(forest: &Forest, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| forest.get(id).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn test_roots_and_children_in_record_order() {
        let forest = build_forest(&[
            Record::new("1", "A"),
            Record::new("2", "B").with_parent_name("A"),
            Record::new("3", "C").with_parent_name("A"),
            Record::new("4", "D"),
        ]);

        assert_eq!(names(&forest, forest.roots()), vec!["A", "D"]);
        assert_eq!(names(&forest, forest.children_of(&"1".into())), vec!["B", "C"]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let forest = build_forest(&[
            Record::new("2", "B").with_parent_name("A"),
            Record::new("1", "A"),
        ]);

        assert_eq!(forest.len(), 2);
        assert_eq!(names(&forest, forest.children_of(&"1".into())), vec!["B"]);
    }

    #[test]
    fn test_orphan_dropped_with_its_subtree() {
        let (forest, report) = build_forest_with_report(&[
            Record::new("1", "A"),
            Record::new("2", "Lost").with_parent_name("Ghost"),
            Record::new("3", "LostChild").with_parent_name("Lost"),
        ]);

        assert_eq!(forest.len(), 1);
        assert_eq!(
            report.orphans,
            vec![Orphan {
                id: "2".into(),
                missing_parent: "Ghost".to_string()
            }]
        );
        assert_eq!(report.unreachable, vec![NodeId::from("3")]);
        assert_eq!(report.dropped(), 2);
    }

    #[test]
    fn test_cycle_is_unreachable() {
        let (forest, report) = build_forest_with_report(&[
            Record::new("1", "A").with_parent_name("B"),
            Record::new("2", "B").with_parent_name("A"),
            Record::new("3", "Self").with_parent_id("3"),
        ]);

        assert!(forest.is_empty());
        assert_eq!(report.unreachable, vec![NodeId::from("1"), "2".into()]);
        assert_eq!(report.orphans.len(), 1);
        assert_eq!(report.orphans[0].id, NodeId::from("3"));
    }

    #[test]
    fn test_parent_id_wins_over_name() {
        let forest = build_forest(&[
            Record::new("1", "Team"),
            Record::new("2", "Team"),
            Record::new("3", "Member")
                .with_parent_name("Team")
                .with_parent_id("1"),
        ]);

        assert_eq!(names(&forest, forest.children_of(&"1".into())), vec!["Member"]);
        assert!(forest.children_of(&"2".into()).is_empty());
    }

    #[test]
    fn test_duplicate_names_resolve_to_last_and_never_merge() {
        let (forest, report) = build_forest_with_report(&[
            Record::new("1", "Team"),
            Record::new("2", "Team"),
            Record::new("3", "Member").with_parent_name("Team"),
        ]);

        assert_eq!(forest.roots().len(), 2);
        assert!(forest.children_of(&"1".into()).is_empty());
        assert_eq!(names(&forest, forest.children_of(&"2".into())), vec!["Member"]);
        assert_eq!(report.ambiguous_names, vec!["Team".to_string()]);
    }

    #[test]
    fn test_stale_parent_id_is_orphan() {
        // "A" was deleted and re-created under a new id
        let (forest, report) = build_forest_with_report(&[
            Record::new("3", "A"),
            Record::new("2", "B")
                .with_parent_name("A")
                .with_parent_id("1"),
            Record::new("4", "C").with_parent_name("B").with_parent_id("2"),
        ]);

        assert_eq!(forest.len(), 1);
        assert!(forest.children_of(&"3".into()).is_empty());
        assert_eq!(report.orphans.len(), 1);
        assert_eq!(report.orphans[0].id, NodeId::from("2"));
        assert_eq!(report.orphans[0].missing_parent, "1");
        assert_eq!(report.unreachable, vec![NodeId::from("4")]);
    }

    #[test]
    fn test_nameless_and_duplicate_ids_skipped() {
        let (forest, report) = build_forest_with_report(&[
            Record::new("1", "A"),
            Record::new("1", "A again"),
            Record::new("2", ""),
        ]);

        assert_eq!(forest.len(), 1);
        assert_eq!(report.duplicate_ids, vec![NodeId::from("1")]);
        assert_eq!(report.nameless, vec![NodeId::from("2")]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_parent_name_makes_root() {
        let forest = build_forest(&[Record::new("1", "A").with_parent_name("")]);
        assert_eq!(forest.roots(), &[NodeId::from("1")]);
        assert_eq!(forest.get(&"1".into()).unwrap().parent_name, None);
    }
}
