use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Value, json};

use super::{DocumentLayout, PermissionStore, StorageVersion};
use crate::config::GateConfig;
use crate::constants::DEFAULT_PERMISSION_INDEX;
use crate::types::{PatchFields, Permission, PermissionDelta};
use crate::{GateError, Result};

#[derive(Debug, Clone)]
struct StoredDocument {
    permission: Permission,
    version: u64,
}

/// In-process permission store that answers the way the cluster would.
///
/// Updates go through the layout's update body, and responses are rendered
/// by the same layout, so callers see the raw shapes of the configured
/// cluster version.
#[derive(Debug)]
pub struct MemoryStore {
    index: String,
    layout: Box<dyn DocumentLayout>,
    documents: RwLock<BTreeMap<String, StoredDocument>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(version: StorageVersion) -> Self {
        Self::with_index(version, DEFAULT_PERMISSION_INDEX)
    }

    #[must_use]
    pub fn with_index(version: StorageVersion, index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            layout: version.layout(),
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store laid out for the configured cluster version and index.
    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        Self::with_index(config.storage_version, config.permission_index.clone())
    }

    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    #[must_use]
    pub fn version(&self) -> StorageVersion {
        self.layout.version()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StorageVersion::default())
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn get(&self, username: &str) -> Result<Permission> {
        self.documents
            .read()
            .get(username)
            .map(|doc| doc.permission.clone())
            .ok_or_else(|| GateError::PermissionNotFound {
                username: username.to_string(),
            })
    }

    async fn create(&self, permission: &Permission) -> Result<bool> {
        let mut documents = self.documents.write();
        if documents.contains_key(&permission.username) {
            return Ok(false);
        }
        documents.insert(
            permission.username.clone(),
            StoredDocument {
                permission: permission.clone(),
                version: 1,
            },
        );
        Ok(true)
    }

    async fn patch(&self, username: &str, patch: &PatchFields) -> Result<Vec<u8>> {
        let body = self.layout.update_body(patch);
        let doc = body.get("doc").cloned().unwrap_or(Value::Null);
        let delta: PermissionDelta =
            serde_json::from_value(doc).map_err(|err| GateError::Storage {
                reason: format!("update body rejected: {err}"),
            })?;

        let mut documents = self.documents.write();
        if !documents.contains_key(username) {
            return Err(GateError::PermissionNotFound {
                username: username.to_string(),
            });
        }
        // A rename must not land on another record.
        if let Some(target) = delta
            .username
            .as_deref()
            .filter(|target| !target.is_empty() && *target != username)
        {
            if documents.contains_key(target) {
                return Err(GateError::PermissionExists {
                    username: target.to_string(),
                });
            }
        }
        let Some(mut stored) = documents.remove(username) else {
            return Err(GateError::PermissionNotFound {
                username: username.to_string(),
            });
        };
        delta.apply_to(&mut stored.permission);
        stored.version += 1;

        // A patched username re-keys the document.
        let id = stored.permission.username.clone();
        let response = self.layout.update_response(&self.index, &id, stored.version);
        tracing::debug!(
            target = "esgate::storage",
            path = %self.layout.update_path(&self.index, username),
            version = stored.version,
            "permission patched"
        );
        documents.insert(id, stored);
        Ok(serde_json::to_vec(&response)?)
    }

    async fn delete(&self, username: &str) -> Result<bool> {
        Ok(self.documents.write().remove(username).is_some())
    }

    async fn list_all(&self) -> Result<Vec<u8>> {
        let documents = self.documents.read();
        let hits: Vec<Value> = documents
            .iter()
            .map(|(id, doc)| {
                json!({
                    "_index": self.index,
                    "_id": id,
                    "_version": doc.version,
                    "_source": doc.permission,
                })
            })
            .collect();
        let response = json!({
            "hits": {
                "total": self.layout.hits_total(hits.len()),
                "hits": hits,
            }
        });
        tracing::debug!(
            target = "esgate::storage",
            path = %self.layout.search_path(&self.index),
            count = documents.len(),
            "permissions listed"
        );
        Ok(serde_json::to_vec(&response)?)
    }
}

/// Decode the records out of a raw `list_all` response.
pub fn records_from_search(raw: &[u8]) -> Result<Vec<Permission>> {
    let response: Value = serde_json::from_slice(raw)?;
    let Some(hits) = response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
    else {
        return Err(GateError::Storage {
            reason: "list response has no hits array".to_string(),
        });
    };
    hits.iter()
        .map(|hit| {
            let source = hit.get("_source").cloned().unwrap_or(Value::Null);
            serde_json::from_value(source).map_err(GateError::from)
        })
        .collect()
}
