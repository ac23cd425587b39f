//! Firestore REST v1 backend
//!
//! Documents use Firestore's typed-value encoding:
//!
//! ```json
//! {
//!   "name": "projects/p/databases/(default)/documents/hierarchies/AbC123",
//!   "fields": {
//!     "name":       { "stringValue": "Backend" },
//!     "parentName": { "stringValue": "Engineering" },
//!     "parentId":   { "stringValue": "XyZ789" },
//!     "breadcrumb": { "stringValue": "Engineering -> Backend" },
//!     "children":   { "mapValue": { "fields": {} } }
//!   }
//! }
//! ```
//!
//! The record id is the last segment of the document `name`.

use super::DocumentStore;
use crate::StoreError;
use async_trait::async_trait;
use orgtree_hierarchy::{NodeId, Record, RecordFields};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub project: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    /// Appended as the `key` query parameter when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_collection() -> String {
    "hierarchies".to_string()
}

impl FirestoreConfig {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            project: project.into(),
            database: default_database(),
            collection: default_collection(),
            api_key: None,
        }
    }

    pub fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project,
            self.database,
            self.collection
        )
    }

    pub fn document_url(&self, id: &NodeId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    /// PATCH that only updates: without the precondition Firestore would
    /// recreate a document another client deleted
    fn patch_request(&self, id: &NodeId, fields: &RecordFields) -> reqwest::RequestBuilder {
        self.with_key(self.client.patch(self.config.document_url(id)))
            .query(&[("currentDocument.exists", "true")])
            .json(&WireDocument::from_fields(fields))
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let url = self.config.collection_url();
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.with_key(self.client.get(&url));
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            debug!(url = %url, page = ?page_token, "Listing documents");
            let page: ListResponse = Self::check(request.send().await?).await?.json().await?;

            for document in page.documents {
                records.push(document.into_record()?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record, StoreError> {
        let url = self.config.collection_url();
        debug!(url = %url, name = %fields.name, "Creating document");

        let request = self
            .with_key(self.client.post(&url))
            .json(&WireDocument::from_fields(fields));
        let document: WireDocument = Self::check(request.send().await?).await?.json().await?;

        document.into_record()
    }

    async fn patch(&self, id: &NodeId, fields: &RecordFields) -> Result<Record, StoreError> {
        let url = self.config.document_url(id);
        debug!(url = %url, name = %fields.name, "Patching document");

        let response = match Self::check(self.patch_request(id, fields).send().await?).await {
            Err(StoreError::Status { status: 404, .. }) => {
                return Err(StoreError::NotFound(id.clone()))
            }
            other => other?,
        };
        let document: WireDocument = response.json().await?;

        document.into_record()
    }

    async fn delete(&self, id: &NodeId) -> Result<(), StoreError> {
        let url = self.config.document_url(id);
        debug!(url = %url, "Deleting document");

        Self::check(self.with_key(self.client.delete(&url)).send().await?).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("firestore:{}", self.config.collection_url())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,

    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default)]
    fields: BTreeMap<String, WireValue>,
}

/// Only the value kinds orgtree reads or writes; others are ignored
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    map_value: Option<WireMap>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct WireMap {
    #[serde(default)]
    fields: BTreeMap<String, WireValue>,
}

impl WireValue {
    fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            map_value: None,
        }
    }

    fn empty_map() -> Self {
        Self {
            string_value: None,
            map_value: Some(WireMap::default()),
        }
    }
}

impl WireDocument {
    fn from_fields(fields: &RecordFields) -> Self {
        let mut wire = BTreeMap::new();
        wire.insert("name".to_string(), WireValue::string(&fields.name));
        // Roots carry an empty parentName, as existing documents do
        wire.insert(
            "parentName".to_string(),
            WireValue::string(fields.parent_name.clone().unwrap_or_default()),
        );
        if let Some(parent_id) = &fields.parent_id {
            wire.insert("parentId".to_string(), WireValue::string(parent_id.as_str()));
        }
        if let Some(breadcrumb) = &fields.breadcrumb {
            wire.insert("breadcrumb".to_string(), WireValue::string(breadcrumb));
        }
        wire.insert("children".to_string(), WireValue::empty_map());

        Self {
            name: None,
            fields: wire,
        }
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(|v| v.string_value.clone())
    }

    fn into_record(self) -> Result<Record, StoreError> {
        let id = self
            .name
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(NodeId::from)
            .ok_or_else(|| StoreError::Decode("document without a name".to_string()))?;

        Ok(Record {
            id,
            name: self.string_field("name").unwrap_or_default(),
            parent_name: self.string_field("parentName").filter(|p| !p.is_empty()),
            parent_id: self
                .string_field("parentId")
                .filter(|p| !p.is_empty())
                .map(NodeId::from),
            breadcrumb: self.string_field("breadcrumb"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_document() {
        let document: WireDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/hierarchies/AbC123",
            "fields": {
                "name": { "stringValue": "Backend" },
                "parentName": { "stringValue": "Engineering" },
                "breadcrumb": { "stringValue": "Engineering -> Backend" },
                "children": { "mapValue": { "fields": {} } },
                "legacy": { "integerValue": "4" }
            },
            "createTime": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let record = document.into_record().unwrap();
        assert_eq!(record.id, NodeId::from("AbC123"));
        assert_eq!(record.name, "Backend");
        assert_eq!(record.parent_name.as_deref(), Some("Engineering"));
        assert_eq!(record.parent_id, None);
        assert_eq!(record.breadcrumb.as_deref(), Some("Engineering -> Backend"));
    }

    #[test]
    fn test_empty_parent_name_decodes_as_root() {
        let document: WireDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/hierarchies/r1",
            "fields": {
                "name": { "stringValue": "Engineering" },
                "parentName": { "stringValue": "" }
            }
        }))
        .unwrap();

        assert_eq!(document.into_record().unwrap().parent_name, None);
    }

    #[test]
    fn test_encode_fields() {
        let fields = RecordFields {
            name: "API".to_string(),
            parent_name: Some("Backend".to_string()),
            parent_id: Some("b1".into()),
            breadcrumb: Some("Engineering -> Backend -> API".to_string()),
        };

        let value = serde_json::to_value(WireDocument::from_fields(&fields)).unwrap();
        assert_eq!(
            value,
            json!({
                "fields": {
                    "breadcrumb": { "stringValue": "Engineering -> Backend -> API" },
                    "children": { "mapValue": { "fields": {} } },
                    "name": { "stringValue": "API" },
                    "parentId": { "stringValue": "b1" },
                    "parentName": { "stringValue": "Backend" }
                }
            })
        );
    }

    #[test]
    fn test_root_encodes_empty_parent_name() {
        let fields = RecordFields {
            name: "Engineering".to_string(),
            ..RecordFields::default()
        };

        let value = serde_json::to_value(WireDocument::from_fields(&fields)).unwrap();
        assert_eq!(value["fields"]["parentName"]["stringValue"], "");
        assert!(value["fields"].get("parentId").is_none());
    }

    #[test]
    fn test_document_without_name_is_decode_error() {
        let document = WireDocument::default();
        assert!(matches!(document.into_record(), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_urls() {
        let mut config = FirestoreConfig::new("my-apps");
        config.base_url = "http://localhost:8080/".to_string();

        assert_eq!(
            config.collection_url(),
            "http://localhost:8080/v1/projects/my-apps/databases/(default)/documents/hierarchies"
        );
        assert_eq!(
            config.document_url(&"AbC".into()),
            "http://localhost:8080/v1/projects/my-apps/databases/(default)/documents/hierarchies/AbC"
        );
    }

    #[test]
    fn test_patch_requires_existing_document() {
        let mut config = FirestoreConfig::new("my-apps");
        config.api_key = Some("k".to_string());
        let store = FirestoreStore::new(config).unwrap();

        let fields = RecordFields {
            name: "Platform".to_string(),
            ..RecordFields::default()
        };
        let request = store.patch_request(&"AbC".into(), &fields).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::PATCH);
        assert!(request.url().path().ends_with("/documents/hierarchies/AbC"));
        let query: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("currentDocument.exists".to_string(), "true".to_string())));
        assert!(query.contains(&("key".to_string(), "k".to_string())));
    }

    #[test]
    fn test_config_defaults() {
        let config: FirestoreConfig = serde_json::from_value(json!({ "project": "p" })).unwrap();
        assert_eq!(config, FirestoreConfig::new("p"));
    }
}
