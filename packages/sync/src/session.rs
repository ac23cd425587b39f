//! # Hierarchy Session
//!
//! The sync controller. A session owns the canonical forest, the form and a
//! handle to the document store, and is the only writer of the first two.
//!
//! Every write follows the same shape:
//!
//! ```text
//! validate form ──✗──▶ SyncError::Validation   (no remote call)
//!      │
//!      ▼
//! remote request ──✗──▶ SyncError::Remote       (forest + form untouched)
//!      │
//!      ▼
//! Mutation::apply on the confirmed record ──▶ new forest, form cleared
//! ```
//!
//! State-changing methods take `&mut self` across the remote await, so a
//! session never has two writes in flight.

use crate::form::{FormMode, FormState};
use crate::intent::{Intent, SessionView, SyncOutcome};
use crate::store::DocumentStore;
use crate::{StoreError, SyncError};
use orgtree_hierarchy::{
    annotate_forest, breadcrumb_of, build_forest_with_report, compose, BuildReport, Forest,
    Mutation, NodeEntry, NodeId, NodeUpdate, RecordFields,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct HierarchySession {
    store: Arc<dyn DocumentStore>,

    /// Canonical state, replaced wholesale on every change
    forest: Forest,

    form: FormState,

    /// What the last load dropped
    last_report: BuildReport,

    /// Increments on every applied change
    version: u64,
}

impl HierarchySession {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            forest: Forest::new(),
            form: FormState::default(),
            last_report: BuildReport::default(),
            version: 0,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn last_report(&self) -> &BuildReport {
        &self.last_report
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Render-ready snapshot with fresh breadcrumbs
    pub fn view(&self) -> SessionView {
        SessionView {
            form: self.form.clone(),
            tree: annotate_forest(&self.forest),
            version: self.version,
        }
    }

    /// Fetch every record and rebuild the forest
    pub async fn load(&mut self) -> Result<SyncOutcome, SyncError> {
        let records = self
            .store
            .list()
            .await
            .map_err(|e| self.remote_failure("load", e))?;

        let (forest, report) = build_forest_with_report(&records);
        log_report(&report);

        self.forest = forest;
        self.last_report = report;
        self.version += 1;

        info!(
            store = %self.store.describe(),
            nodes = self.forest.len(),
            dropped = self.last_report.dropped(),
            "Loaded hierarchy"
        );

        Ok(SyncOutcome::Loaded {
            nodes: self.forest.len(),
            dropped: self.last_report.dropped(),
        })
    }

    /// Enter add mode under `parent`
    pub fn add_child(&mut self, parent: &NodeId) -> Result<(), SyncError> {
        let entry = lookup(&self.forest, parent)?;
        self.form.select_parent(entry);
        Ok(())
    }

    /// Enter update mode for `target`; no remote call
    pub fn edit(&mut self, target: &NodeId) -> Result<(), SyncError> {
        let entry = lookup(&self.forest, target)?;
        self.form.begin_edit(entry);
        Ok(())
    }

    pub fn set_child_name(&mut self, name: impl Into<String>) {
        self.form.set_child_name(name);
    }

    pub fn cancel(&mut self) {
        self.form.clear();
    }

    /// Save in add mode, update in update mode
    pub async fn submit(&mut self) -> Result<SyncOutcome, SyncError> {
        match self.form.mode() {
            FormMode::Add => self.save().await,
            FormMode::Update => self.update().await,
        }
    }

    /// Create the form's child under the selected parent (or as a root)
    pub async fn save(&mut self) -> Result<SyncOutcome, SyncError> {
        self.form.validate()?;

        let parent = match &self.form.selected_parent {
            Some(id) => Some(self.node(id)?.clone()),
            None => None,
        };

        let name = self.form.child_name.trim().to_string();
        let parent_path = parent
            .as_ref()
            .and_then(|p| breadcrumb_of(&self.forest, &p.id))
            .unwrap_or_default();

        let fields = RecordFields {
            breadcrumb: Some(compose(&parent_path, &name)),
            parent_name: parent.as_ref().map(|p| p.name.clone()),
            parent_id: parent.as_ref().map(|p| p.id.clone()),
            name,
        };

        let record = self
            .store
            .create(&fields)
            .await
            .map_err(|e| self.remote_failure("save", e))?;

        let id = record.id.clone();
        self.commit(Mutation::Insert {
            parent_id: parent.map(|p| p.id),
            node: record,
        });
        self.form.clear();

        info!(id = %id, "Saved node");
        Ok(SyncOutcome::Inserted { id })
    }

    /// Rewrite the edit target with the form's child name
    pub async fn update(&mut self) -> Result<SyncOutcome, SyncError> {
        let target = self.form.edit_target.clone().ok_or(SyncError::NoEditTarget)?;
        self.form.validate()?;
        let entry = self.node(&target)?.clone();

        let name = self.form.child_name.trim().to_string();
        let parent_path = entry
            .parent
            .as_ref()
            .and_then(|p| breadcrumb_of(&self.forest, p))
            .unwrap_or_default();

        let fields = RecordFields {
            breadcrumb: Some(compose(&parent_path, &name)),
            parent_name: entry.parent_name.clone(),
            parent_id: entry.parent.clone(),
            name,
        };

        let record = self
            .store
            .patch(&target, &fields)
            .await
            .map_err(|e| self.remote_failure("update", e))?;

        self.commit(Mutation::Update {
            target_id: target.clone(),
            fields: NodeUpdate::rename(record.name),
        });
        self.form.clear();

        info!(id = %target, "Updated node");
        Ok(SyncOutcome::Updated { id: target })
    }

    /// Delete `target` remotely, then drop its subtree locally
    pub async fn delete(&mut self, target: &NodeId) -> Result<SyncOutcome, SyncError> {
        self.node(target)?;

        self.store
            .delete(target)
            .await
            .map_err(|e| self.remote_failure("delete", e))?;

        let removed = self.forest.subtree_ids(target);
        self.commit(Mutation::Delete {
            target_id: target.clone(),
        });
        if self.form.forget(&removed) {
            info!(id = %target, "Form pointed into deleted subtree, cleared");
        }

        info!(id = %target, removed = removed.len(), "Deleted node");
        Ok(SyncOutcome::Deleted {
            id: target.clone(),
            removed: removed.len(),
        })
    }

    /// Route a UI intent to the matching operation
    pub async fn dispatch(&mut self, intent: Intent) -> Result<SyncOutcome, SyncError> {
        match intent {
            Intent::Load => self.load().await,
            Intent::AddChild { parent_id } => {
                self.add_child(&parent_id)?;
                Ok(SyncOutcome::FormChanged)
            }
            Intent::AddRoot => {
                self.form.clear();
                Ok(SyncOutcome::FormChanged)
            }
            Intent::Edit { node_id } => {
                self.edit(&node_id)?;
                Ok(SyncOutcome::FormChanged)
            }
            Intent::SetChildName { name } => {
                self.set_child_name(name);
                Ok(SyncOutcome::FormChanged)
            }
            Intent::Submit => self.submit().await,
            Intent::Cancel => {
                self.cancel();
                Ok(SyncOutcome::FormChanged)
            }
            Intent::Delete { node_id } => self.delete(&node_id).await,
        }
    }

    fn node(&self, id: &NodeId) -> Result<&NodeEntry, SyncError> {
        lookup(&self.forest, id)
    }

    fn commit(&mut self, mutation: Mutation) {
        if let Err(reason) = mutation.validate(&self.forest) {
            warn!(target_id = %mutation.target(), %reason, "Mutation had no local effect");
        }
        self.forest = mutation.apply(&self.forest);
        self.version += 1;
    }

    fn remote_failure(&self, operation: &'static str, e: StoreError) -> SyncError {
        error!(
            operation,
            store = %self.store.describe(),
            error = %e,
            "Remote call failed, local state unchanged"
        );
        SyncError::Remote(e)
    }
}

/// Borrows only the forest, so callers can still write to the form
fn lookup<'a>(forest: &'a Forest, id: &NodeId) -> Result<&'a NodeEntry, SyncError> {
    forest
        .get(id)
        .ok_or_else(|| SyncError::UnknownNode(id.clone()))
}

fn log_report(report: &BuildReport) {
    for orphan in &report.orphans {
        warn!(id = %orphan.id, parent = %orphan.missing_parent, "Dropped orphan record");
    }
    for id in &report.unreachable {
        warn!(id = %id, "Dropped record unreachable from any root");
    }
    for id in &report.nameless {
        warn!(id = %id, "Skipped record without a name");
    }
    for id in &report.duplicate_ids {
        warn!(id = %id, "Skipped record with a duplicate id");
    }
    for name in &report.ambiguous_names {
        warn!(name = %name, "Name used by several records, parentName links resolve to the last one");
    }
}
