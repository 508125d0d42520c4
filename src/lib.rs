#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(
    test,
    allow(clippy::useless_vec, clippy::uninlined_format_args)
)]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: error sections on every fallible accessor add little.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Pattern matching: the method and status tables read better flat.
#![allow(clippy::match_same_arms)]
#![allow(clippy::manual_let_else)]
//
#![allow(clippy::needless_pass_by_value)] // Builders take owned values
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::unnecessary_wraps)]

//! Request classification and permission enforcement for a search-cluster
//! proxy.
//!
//! A request's method and path are matched against a registry of endpoint
//! specs to find the ACL category, the operation and the resource names it
//! touches. The caller's stored permission is then checked by an ordered
//! chain of filters. [`Gate`] ties both halves together behind a
//! [`PermissionStore`]; [`PermissionAdmin`] manages the stored records.

/// The esgate-core crate version (matches `Cargo.toml`).
pub const ESGATE_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod admin;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod enforce;
pub mod error;
pub mod gate;
pub mod hasher;
pub mod registry;
pub mod storage;
pub mod types;

pub use admin::PermissionAdmin;
pub use classifier::{Classifier, get_index_names, get_op, matches_keywords};
pub use config::{GateConfig, GateConfigBuilder};
pub use constants::*;
pub use enforce::{
    AclFilter, EnforcementChain, OperationFilter, RequestFilter, RequestScope, ResourceFilter,
};
pub use error::{GateError, Result};
pub use gate::{Authorization, Gate};
#[cfg(feature = "argon2")]
pub use hasher::Argon2Hasher;
pub use hasher::{CredentialHasher, HashedCredential};
pub use registry::{ApiDefinition, DEFAULT_DEFINITIONS, EndpointSpec, SpecRegistry};
pub use storage::{
    DocumentLayout, Es6Layout, Es7Layout, MemoryStore, PermissionStore, StorageVersion,
    records_from_search,
};
pub use types::{
    Acl, Classification, CompiledPermission, Method, NewPermission, Operation, PatchFields,
    Permission, PermissionDelta, RequestParts, check_patterns, normalize_path, normalize_pattern,
};

// Re-exported so embedders can build cancellation tokens without a direct dependency.
pub use tokio_util::sync::CancellationToken;
