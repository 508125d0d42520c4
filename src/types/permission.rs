//! Permission records: the stored capabilities of a caller.
//!
//! A [`Permission`] is the persisted shape. [`PermissionDelta`] carries only
//! the fields an update changes, and [`NewPermission`] is the explicit
//! configuration used to create a record. [`CompiledPermission`] is what the
//! enforcement chain works with: a record whose resource patterns have been
//! compiled once at load time.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::acl::{Acl, Operation};
use crate::constants::{DEFAULT_ACLS, DEFAULT_OPS, WILDCARD_RESOURCE};
use crate::{GateError, Result};

const RECORD_KIND: &str = "permission";

/// Field map handed to the storage collaborator for a partial update.
pub type PatchFields = Map<String, Value>;

/// Stored record of a caller's identity and granted capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(alias = "user_id")]
    pub username: String,
    /// Credential hash once stored; plaintext only on the way in.
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password_hash_type: String,
    /// `None` means the flag was never set, which is not valid for a stored record.
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub acls: BTreeSet<Acl>,
    #[serde(default)]
    pub ops: BTreeSet<Operation>,
    /// Resource-name patterns, in the order they were granted.
    #[serde(default)]
    pub indices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Permission {
    /// Check the fields every stored record must carry.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(GateError::MissingField {
                kind: RECORD_KIND,
                field: "username",
            });
        }
        if self.is_admin.is_none() {
            return Err(GateError::MissingField {
                kind: RECORD_KIND,
                field: "is_admin",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn has_acl(&self, acl: Acl) -> bool {
        self.acls.contains(&acl)
    }

    #[must_use]
    pub fn can_do(&self, op: Operation) -> bool {
        self.ops.contains(&op)
    }

    /// True if any stored pattern matches `name`.
    ///
    /// Compiles the patterns on every call; request handling goes through
    /// [`CompiledPermission`] instead.
    pub fn can_access_resource(&self, name: &str) -> Result<bool> {
        for pattern in &self.indices {
            if compile_pattern(pattern)?.is_match(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin == Some(true)
    }

    /// Compile the resource patterns for use on the request path.
    pub fn compile(self) -> Result<CompiledPermission> {
        CompiledPermission::new(self)
    }
}

/// A permission record with its resource patterns precompiled.
#[derive(Debug, Clone)]
pub struct CompiledPermission {
    permission: Permission,
    patterns: Vec<Regex>,
}

impl CompiledPermission {
    pub fn new(permission: Permission) -> Result<Self> {
        let patterns = permission
            .indices
            .iter()
            .map(|pattern| compile_pattern(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            permission,
            patterns,
        })
    }

    #[must_use]
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.permission.username
    }

    #[must_use]
    pub fn has_acl(&self, acl: Acl) -> bool {
        self.permission.has_acl(acl)
    }

    #[must_use]
    pub fn can_do(&self, op: Operation) -> bool {
        self.permission.can_do(op)
    }

    /// True if any pattern matches `name`.
    #[must_use]
    pub fn can_access_resource(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }

    /// Find the first pattern that does not match `name`.
    ///
    /// `None` means every pattern matched (vacuously so when there are none).
    #[must_use]
    pub fn first_mismatch(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .zip(&self.permission.indices)
            .find(|(pattern, _)| !pattern.is_match(name))
            .map(|(_, raw)| raw.as_str())
    }

    #[must_use]
    pub fn into_inner(self) -> Permission {
        self.permission
    }
}

/// Read a stored pattern as a regex, treating a bare `*` as `.*`.
#[must_use]
pub fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = String::with_capacity(pattern.len() + 2);
    let mut previous = None;
    for ch in pattern.chars() {
        if ch == '*' && previous != Some('.') && previous != Some('\\') {
            normalized.push('.');
        }
        normalized.push(ch);
        previous = Some(ch);
    }
    normalized
}

/// Fail on the first pattern that does not compile.
pub fn check_patterns(patterns: &[String]) -> Result<()> {
    patterns
        .iter()
        .try_for_each(|pattern| compile_pattern(pattern).map(drop))
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&normalize_pattern(pattern)).map_err(|err| {
        tracing::warn!(target = "esgate::permission", pattern, error = %err, "invalid resource pattern");
        GateError::InvalidResourcePattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    })
}

/// Partially-populated record describing an update.
///
/// Unset fields are left untouched by the update; they never clear the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDelta {
    #[serde(default, alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Set only alongside a freshly hashed password by the admin surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) password_hash_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acls: Option<BTreeSet<Acl>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<BTreeSet<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PermissionDelta {
    /// Rename the record.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn is_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    #[must_use]
    pub fn acls(mut self, acls: impl IntoIterator<Item = Acl>) -> Self {
        self.acls = Some(acls.into_iter().collect());
        self
    }

    #[must_use]
    pub fn ops(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.ops = Some(ops.into_iter().collect());
        self
    }

    #[must_use]
    pub fn indices<S: Into<String>>(mut self, indices: impl IntoIterator<Item = S>) -> Self {
        self.indices = Some(indices.into_iter().map(Into::into).collect());
        self
    }

    /// Map of the fields this delta sets, keyed by wire name.
    ///
    /// Empty strings and unset fields are omitted entirely; omission means
    /// "no change".
    pub fn build_patch(&self) -> Result<PatchFields> {
        let mut patch = PatchFields::new();
        insert_text(&mut patch, "username", self.username.as_deref());
        insert_text(&mut patch, "password", self.password.as_deref());
        insert_text(
            &mut patch,
            "password_hash_type",
            self.password_hash_type.as_deref(),
        );
        if let Some(is_admin) = self.is_admin {
            patch.insert("is_admin".to_string(), Value::Bool(is_admin));
        }
        insert_text(&mut patch, "email", self.email.as_deref());
        if let Some(acls) = &self.acls {
            patch.insert("acls".to_string(), serde_json::to_value(acls)?);
        }
        if let Some(ops) = &self.ops {
            patch.insert("ops".to_string(), serde_json::to_value(ops)?);
        }
        if let Some(indices) = &self.indices {
            patch.insert("indices".to_string(), serde_json::to_value(indices)?);
        }
        Ok(patch)
    }

    /// Apply this delta to a stored record, field by field.
    pub fn apply_to(&self, permission: &mut Permission) {
        if let Some(username) = self.username.as_ref().filter(|s| !s.is_empty()) {
            permission.username.clone_from(username);
        }
        if let Some(password) = self.password.as_ref().filter(|s| !s.is_empty()) {
            permission.password.clone_from(password);
        }
        if let Some(kind) = self.password_hash_type.as_ref().filter(|s| !s.is_empty()) {
            permission.password_hash_type.clone_from(kind);
        }
        if self.is_admin.is_some() {
            permission.is_admin = self.is_admin;
        }
        if let Some(email) = self.email.as_ref().filter(|s| !s.is_empty()) {
            permission.email = Some(email.clone());
        }
        if let Some(acls) = &self.acls {
            permission.acls.clone_from(acls);
        }
        if let Some(ops) = &self.ops {
            permission.ops.clone_from(ops);
        }
        if let Some(indices) = &self.indices {
            permission.indices.clone_from(indices);
        }
    }
}

fn insert_text(patch: &mut PatchFields, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        patch.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// Configuration for creating a permission record.
///
/// `username`, `password` and `is_admin` are required; the remaining
/// collections fall back to [`DEFAULT_ACLS`], [`DEFAULT_OPS`] and no
/// resource patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    #[serde(alias = "user_id")]
    pub username: String,
    /// Plaintext credential; hashed by the admin surface before storage.
    pub password: String,
    pub is_admin: bool,
    #[serde(default)]
    pub acls: Option<BTreeSet<Acl>>,
    #[serde(default)]
    pub ops: Option<BTreeSet<Operation>>,
    #[serde(default)]
    pub indices: Option<Vec<String>>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewPermission {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_admin,
            acls: None,
            ops: None,
            indices: None,
            email: None,
        }
    }

    /// Administrator: every ACL, every operation, every resource.
    #[must_use]
    pub fn admin(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, password, true)
            .with_acls(Acl::ALL)
            .with_ops(Operation::ALL)
            .with_indices([WILDCARD_RESOURCE])
    }

    #[must_use]
    pub fn with_acls(mut self, acls: impl IntoIterator<Item = Acl>) -> Self {
        self.acls = Some(acls.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_ops(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.ops = Some(ops.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_indices<S: Into<String>>(mut self, indices: impl IntoIterator<Item = S>) -> Self {
        self.indices = Some(indices.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Build the stored record around an already-hashed credential.
    #[must_use]
    pub fn into_permission(self, password_hash: String, hash_type: &str) -> Permission {
        Permission {
            username: self.username,
            password: password_hash,
            password_hash_type: hash_type.to_string(),
            is_admin: Some(self.is_admin),
            acls: self
                .acls
                .unwrap_or_else(|| DEFAULT_ACLS.iter().copied().collect()),
            ops: self
                .ops
                .unwrap_or_else(|| DEFAULT_OPS.iter().copied().collect()),
            indices: self.indices.unwrap_or_default(),
            email: self.email.filter(|email| !email.is_empty()),
        }
    }
}
