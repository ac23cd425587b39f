//! # Orgtree Hierarchy
//!
//! Core tree engine for orgtree: turns the flat record list held by a
//! document store into a forest, derives breadcrumbs, and rewrites the
//! forest in response to insert/update/delete operations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: flat Records (id, name, parentName)  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ builder: Records → Forest (arena)           │
//! │  - link by parent id, fall back to name     │
//! │  - drop orphans and unreachable records     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutator: Forest + Mutation → new Forest     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ breadcrumb: Forest → nested Node view       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ids link, names display**: every internal edge is a [`NodeId`]
//! 2. **Forests are values**: mutations return a new forest, entries are shared
//! 3. **Lenient mutation**: applying against a missing target is a no-op
//! 4. **Derived breadcrumbs**: never stored in the arena, computed on render
//!
//! ## Usage
//!
//! ```rust
//! use orgtree_hierarchy::{annotate_forest, build_forest, mutator, NodeId, Record};
//!
//! let records = vec![
//!     Record::new("1", "Engineering"),
//!     Record::new("2", "Backend").with_parent_name("Engineering"),
//! ];
//! let forest = build_forest(&records);
//!
//! let api = Record::new("3", "API");
//! let backend = NodeId::from("2");
//! let forest = mutator::insert(&forest, Some(&backend), &api);
//!
//! let tree = annotate_forest(&forest);
//! assert_eq!(tree[0].children[0].children[0].breadcrumb, "Engineering -> Backend -> API");
//! ```

pub mod breadcrumb;
pub mod builder;
mod errors;
pub mod forest;
pub mod mutator;
mod record;

pub use breadcrumb::{annotate, annotate_forest, breadcrumb_of, compose, Node, SEPARATOR};
pub use builder::{build_forest, build_forest_with_report, BuildReport, Orphan};
pub use errors::MutationError;
pub use forest::{Forest, NodeEntry};
pub use mutator::{Mutation, NodeUpdate};
pub use record::{NodeId, Record, RecordFields};
