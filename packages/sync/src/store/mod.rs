//! # Document Stores
//!
//! The remote side of orgtree: a flat collection of documents reachable
//! through four calls. The session only ever sees this trait, so backends
//! can be swapped without touching the tree logic.
//!
//! - [`MemoryStore`]: in-process, for tests and demos
//! - [`JsonFileStore`]: a JSON file on disk
//! - [`FirestoreStore`]: Firestore REST v1 (feature `firestore`)

mod file;
#[cfg(feature = "firestore")]
mod firestore;
mod memory;

pub use file::JsonFileStore;
#[cfg(feature = "firestore")]
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::{MemoryStore, StoreOp};

use crate::StoreError;
use async_trait::async_trait;
use orgtree_hierarchy::{NodeId, Record, RecordFields};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Generic CRUD over hierarchy documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Create a document; the store assigns the id
    async fn create(&self, fields: &RecordFields) -> Result<Record, StoreError>;

    /// Overwrite the fields of an existing document
    async fn patch(&self, id: &NodeId, fields: &RecordFields) -> Result<Record, StoreError>;

    async fn delete(&self, id: &NodeId) -> Result<(), StoreError>;

    /// Short human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Which backend to open, as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreConfig {
    /// Local JSON file
    File { path: PathBuf },

    /// In-process only, lost on exit
    Memory,

    #[cfg(feature = "firestore")]
    Firestore(FirestoreConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: PathBuf::from("hierarchy.json"),
        }
    }
}

impl StoreConfig {
    /// Open the configured store. Relative file paths resolve against `base_dir`.
    pub fn open(&self, base_dir: &std::path::Path) -> Result<Arc<dyn DocumentStore>, StoreError> {
        let store: Arc<dyn DocumentStore> = match self {
            StoreConfig::File { path } => Arc::new(JsonFileStore::new(base_dir.join(path))),
            StoreConfig::Memory => Arc::new(MemoryStore::new()),
            #[cfg(feature = "firestore")]
            StoreConfig::Firestore(config) => Arc::new(FirestoreStore::new(config.clone())?),
        };

        tracing::debug!(store = %store.describe(), "Opened document store");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_config() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "kind": "file", "path": "org.json" }"#).unwrap();
        assert_eq!(
            config,
            StoreConfig::File {
                path: PathBuf::from("org.json")
            }
        );
    }

    #[test]
    fn test_default_is_file() {
        assert!(matches!(StoreConfig::default(), StoreConfig::File { .. }));
    }

    #[test]
    fn test_open_joins_base_dir() {
        let config = StoreConfig::File {
            path: PathBuf::from("org.json"),
        };
        let store = config.open(std::path::Path::new("/tmp/orgtree")).unwrap();
        assert!(store.describe().contains("/tmp/orgtree/org.json"));
    }
}
