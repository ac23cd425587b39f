//! # Form State
//!
//! Transient input for the next save or update. The form is in update mode
//! while an edit target is set and in add mode otherwise. It is reset after
//! every confirmed write and left alone when a write fails.

use crate::ValidationErrors;
use orgtree_hierarchy::{NodeEntry, NodeId};
use serde::Serialize;

pub const CHILD_NAME_REQUIRED: &str = "Child Name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormMode {
    Add,
    Update,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Read-only in the UI; pre-populated from the selected or edited node
    pub parent_name: String,

    pub child_name: String,

    /// Node the next save attaches under (None: new root)
    pub selected_parent: Option<NodeId>,

    /// Node the next update rewrites
    pub edit_target: Option<NodeId>,

    pub errors: ValidationErrors,
}

impl FormState {
    pub fn mode(&self) -> FormMode {
        if self.edit_target.is_some() {
            FormMode::Update
        } else {
            FormMode::Add
        }
    }

    /// Enter add mode under `parent`
    pub fn select_parent(&mut self, parent: &NodeEntry) {
        self.parent_name = parent.name.clone();
        self.selected_parent = Some(parent.id.clone());
        self.edit_target = None;
    }

    /// Enter update mode for `node`
    pub fn begin_edit(&mut self, node: &NodeEntry) {
        self.edit_target = Some(node.id.clone());
        self.parent_name = node.parent_name.clone().unwrap_or_default();
        self.child_name = node.name.clone();
    }

    pub fn set_child_name(&mut self, name: impl Into<String>) {
        self.child_name = name.into();
    }

    /// Check required fields, recording messages on the form
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.child_name.trim().is_empty() {
            errors.child_name = Some(CHILD_NAME_REQUIRED.to_string());
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reset if the form points at any of `removed`
    pub fn forget(&mut self, removed: &[NodeId]) -> bool {
        let stale = |slot: &Option<NodeId>| slot.as_ref().is_some_and(|id| removed.contains(id));

        if stale(&self.selected_parent) || stale(&self.edit_target) {
            self.clear();
            true
        } else {
            false
        }
    }
}
