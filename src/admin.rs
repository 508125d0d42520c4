//! Administrative operations on permission records.
//!
//! Everything here runs off the request path. Passwords are hashed on the
//! blocking pool before they reach the store.

use std::sync::Arc;

use log::info;

use crate::hasher::{CredentialHasher, HashedCredential};
use crate::storage::{PermissionStore, records_from_search};
use crate::types::{NewPermission, Permission, PermissionDelta, check_patterns};
use crate::{GateError, Result};

pub struct PermissionAdmin<S> {
    store: S,
    hasher: Arc<dyn CredentialHasher>,
}

impl<S: PermissionStore> PermissionAdmin<S> {
    pub fn new(store: S, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Admin surface backed by [`crate::hasher::Argon2Hasher`].
    #[cfg(feature = "argon2")]
    pub fn with_argon2(store: S) -> Self {
        Self::new(store, Arc::new(crate::hasher::Argon2Hasher))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a record. Fails with [`GateError::PermissionExists`] rather than
    /// overwriting.
    pub async fn create(&self, request: NewPermission) -> Result<Permission> {
        if request.username.is_empty() {
            return Err(GateError::MissingField {
                kind: "permission",
                field: "username",
            });
        }
        if request.password.is_empty() {
            return Err(GateError::MissingField {
                kind: "permission",
                field: "password",
            });
        }

        // Reject patterns the request path would fail to compile.
        if let Some(indices) = &request.indices {
            check_patterns(indices)?;
        }

        let hashed = self.hash(request.password.clone()).await?;
        let permission = request.into_permission(hashed.hash, &hashed.algorithm);
        permission.validate()?;

        if !self.store.create(&permission).await? {
            return Err(GateError::PermissionExists {
                username: permission.username,
            });
        }
        info!("created permission for {}", permission.username);
        Ok(permission)
    }

    pub async fn get(&self, username: &str) -> Result<Permission> {
        self.store.get(username).await
    }

    /// Apply a partial update and return the record as stored afterwards.
    pub async fn patch(&self, username: &str, mut delta: PermissionDelta) -> Result<Permission> {
        if let Some(indices) = &delta.indices {
            check_patterns(indices)?;
        }

        // The algorithm tag only changes together with the hash it describes.
        delta.password_hash_type = None;
        if let Some(password) = delta.password.take().filter(|p| !p.is_empty()) {
            let hashed = self.hash(password).await?;
            delta.password = Some(hashed.hash);
            delta.password_hash_type = Some(hashed.algorithm);
        }

        let patch = delta.build_patch()?;
        if patch.is_empty() {
            return Err(GateError::InvalidRecord {
                reason: "patch does not set any field".to_string(),
            });
        }

        self.store.patch(username, &patch).await?;
        info!("patched permission for {username}: {} field(s)", patch.len());

        let current = delta
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(username);
        self.store.get(current).await
    }

    pub async fn delete(&self, username: &str) -> Result<()> {
        if !self.store.delete(username).await? {
            return Err(GateError::PermissionNotFound {
                username: username.to_string(),
            });
        }
        info!("deleted permission for {username}");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Permission>> {
        let raw = self.store.list_all().await?;
        records_from_search(&raw)
    }

    /// Check a plaintext credential against the stored hash.
    pub async fn verify_password(&self, username: &str, plaintext: &str) -> Result<bool> {
        let record = self.store.get(username).await?;
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &record.password))
            .await
            .map_err(|err| GateError::Hashing {
                reason: err.to_string(),
            })?
    }

    async fn hash(&self, plaintext: String) -> Result<HashedCredential> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|err| GateError::Hashing {
                reason: err.to_string(),
            })?
    }
}
