//! Shared constants for request classification and permission records.

use crate::types::{Acl, Operation};

/// Path segments starting with this marker are API keywords (`_search`, `_refresh`, ...).
pub const KEYWORD_MARKER: char = '_';
/// Placeholder that marks the resource-name segment of an endpoint template.
pub const INDEX_PLACEHOLDER: &str = "{index}";
/// Regex fragment substituted for every `{name}` placeholder in an endpoint template.
pub const PLACEHOLDER_SEGMENT_REGEX: &str = "[^/]+";
/// Resource name used when checking access to cluster-level routes.
pub const WILDCARD_RESOURCE: &str = "*";
/// Query parameter that switches a request to the streaming ACL.
pub const DEFAULT_STREAM_PARAM: &str = "stream";

/// Index that holds permission records in the backing cluster.
pub const DEFAULT_PERMISSION_INDEX: &str = ".permissions";
/// Upper bound on a single permission lookup.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;

/// Message returned for every internal failure; details only go to the logs.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// ACLs granted to a new permission record that does not name its own.
pub const DEFAULT_ACLS: &[Acl] = &[
    Acl::Search,
    Acl::Msearch,
    Acl::Get,
    Acl::Mget,
    Acl::Count,
    Acl::Exists,
    Acl::Source,
    Acl::Explain,
    Acl::FieldCaps,
    Acl::Streams,
];

/// Operations granted to a new permission record that does not name its own.
pub const DEFAULT_OPS: &[Operation] = &[Operation::Read];
