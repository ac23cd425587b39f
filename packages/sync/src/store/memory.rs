use super::DocumentStore;
use crate::StoreError;
use async_trait::async_trait;
use orgtree_hierarchy::{NodeId, Record, RecordFields};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Store calls, for failure injection and call inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Create,
    Patch,
    Delete,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Record>,
    next_id: u64,
    failing: HashSet<StoreOp>,
    calls: Vec<StoreOp>,
}

/// In-process store with sequential ids (`doc-1`, `doc-2`, ...)
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (ids kept as given)
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records,
                ..Inner::default()
            }),
        }
    }

    /// Make every subsequent `op` fail until [`MemoryStore::recover`]
    pub fn fail_on(&self, op: StoreOp) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing.insert(op);
        }
    }

    pub fn recover(&self, op: StoreOp) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing.remove(&op);
        }
    }

    /// Calls received so far, failed ones included
    pub fn calls(&self) -> Vec<StoreOp> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.inner
            .lock()
            .map(|inner| inner.records.clone())
            .unwrap_or_default()
    }

    fn begin(&self, op: StoreOp) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;

        inner.calls.push(op);
        if inner.failing.contains(&op) {
            return Err(StoreError::Unavailable(format!("injected {op:?} failure")));
        }
        Ok(inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let inner = self.begin(StoreOp::List)?;
        Ok(inner.records.clone())
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record, StoreError> {
        let mut inner = self.begin(StoreOp::Create)?;
        inner.next_id += 1;
        let record = fields.clone().into_record(format!("doc-{}", inner.next_id));
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn patch(&self, id: &NodeId, fields: &RecordFields) -> Result<Record, StoreError> {
        let mut inner = self.begin(StoreOp::Patch)?;
        let slot = inner
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        *slot = fields.clone().into_record(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &NodeId) -> Result<(), StoreError> {
        let mut inner = self.begin(StoreOp::Delete)?;
        let before = inner.records.len();
        inner.records.retain(|record| &record.id != id);

        if inner.records.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
