//! Storage collaborator for permission records.
//!
//! The core never talks to the cluster itself; it goes through
//! [`PermissionStore`]. Cluster-version differences live in a
//! [`DocumentLayout`] chosen once from [`StorageVersion`], never re-checked
//! per call.

mod layout;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use layout::{DocumentLayout, Es6Layout, Es7Layout};
pub use memory::{MemoryStore, records_from_search};

use crate::Result;
use crate::types::{PatchFields, Permission};

/// Create/read/patch/delete/list access to permission records.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Fetch one record; a missing record is [`crate::GateError::PermissionNotFound`].
    async fn get(&self, username: &str) -> Result<Permission>;

    /// Store a new record. `Ok(false)` if one with that username already exists.
    async fn create(&self, permission: &Permission) -> Result<bool>;

    /// Partial update; returns the backend's raw response.
    async fn patch(&self, username: &str, patch: &PatchFields) -> Result<Vec<u8>>;

    /// `Ok(false)` if there was nothing to delete.
    async fn delete(&self, username: &str) -> Result<bool>;

    /// Raw search response listing every stored record.
    async fn list_all(&self) -> Result<Vec<u8>>;
}

#[async_trait]
impl<S> PermissionStore for Arc<S>
where
    S: PermissionStore + ?Sized,
{
    async fn get(&self, username: &str) -> Result<Permission> {
        (**self).get(username).await
    }

    async fn create(&self, permission: &Permission) -> Result<bool> {
        (**self).create(permission).await
    }

    async fn patch(&self, username: &str, patch: &PatchFields) -> Result<Vec<u8>> {
        (**self).patch(username, patch).await
    }

    async fn delete(&self, username: &str) -> Result<bool> {
        (**self).delete(username).await
    }

    async fn list_all(&self) -> Result<Vec<u8>> {
        (**self).list_all().await
    }
}

/// Major version of the backing search cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageVersion {
    V6,
    #[default]
    V7,
}

impl StorageVersion {
    /// Map a detected major version; anything other than 6 uses the v7 layout.
    #[must_use]
    pub fn from_major(major: u64) -> Self {
        if major == 6 { Self::V6 } else { Self::V7 }
    }

    #[must_use]
    pub fn layout(self) -> Box<dyn DocumentLayout> {
        match self {
            Self::V6 => Box::new(Es6Layout),
            Self::V7 => Box::new(Es7Layout),
        }
    }
}
