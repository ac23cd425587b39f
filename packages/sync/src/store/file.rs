use super::DocumentStore;
use crate::StoreError;
use async_trait::async_trait;
use orgtree_hierarchy::{NodeId, Record, RecordFields};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileContents {
    #[serde(default)]
    next_id: u64,

    #[serde(default)]
    documents: Vec<Record>,
}

/// Documents kept in a single JSON file
///
/// Every call reads the file, and writes go through a temp file plus rename.
/// A missing file is an empty collection.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<FileContents, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(FileContents::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileContents::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &FileContents) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_string_pretty(contents)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read().await?.documents)
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read().await?;

        contents.next_id += 1;
        let record = fields.clone().into_record(contents.next_id.to_string());
        contents.documents.push(record.clone());

        self.write(&contents).await?;
        Ok(record)
    }

    async fn patch(&self, id: &NodeId, fields: &RecordFields) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read().await?;

        let slot = contents
            .documents
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *slot = fields.clone().into_record(id.clone());
        let record = slot.clone();

        self.write(&contents).await?;
        Ok(record)
    }

    async fn delete(&self, id: &NodeId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read().await?;

        let before = contents.documents.len();
        contents.documents.retain(|record| &record.id != id);
        if contents.documents.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }

        self.write(&contents).await
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
