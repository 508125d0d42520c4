//! ACL categories and the operations a request can perform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Class of cluster functionality a request targets.
///
/// Every classified request maps to exactly one ACL; a permission record grants
/// a set of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Acl {
    Cat,
    Bulk,
    Cluster,
    Search,
    Remote,
    Create,
    Count,
    Scripts,
    Get,
    Reindex,
    FieldCaps,
    Exists,
    Ingest,
    Indices,
    Tasks,
    Update,
    Delete,
    Explain,
    Mget,
    Msearch,
    Mtermvectors,
    Nodes,
    Snapshot,
    Termvectors,
    Source,
    /// Streaming search, selected by the `stream=true` query parameter.
    Streams,
    /// Fallback for requests no endpoint spec recognizes.
    Misc,
}

impl Acl {
    pub const ALL: [Acl; 27] = [
        Acl::Cat,
        Acl::Bulk,
        Acl::Cluster,
        Acl::Search,
        Acl::Remote,
        Acl::Create,
        Acl::Count,
        Acl::Scripts,
        Acl::Get,
        Acl::Reindex,
        Acl::FieldCaps,
        Acl::Exists,
        Acl::Ingest,
        Acl::Indices,
        Acl::Tasks,
        Acl::Update,
        Acl::Delete,
        Acl::Explain,
        Acl::Mget,
        Acl::Msearch,
        Acl::Mtermvectors,
        Acl::Nodes,
        Acl::Snapshot,
        Acl::Termvectors,
        Acl::Source,
        Acl::Streams,
        Acl::Misc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Bulk => "bulk",
            Self::Cluster => "cluster",
            Self::Search => "search",
            Self::Remote => "remote",
            Self::Create => "create",
            Self::Count => "count",
            Self::Scripts => "scripts",
            Self::Get => "get",
            Self::Reindex => "reindex",
            Self::FieldCaps => "field_caps",
            Self::Exists => "exists",
            Self::Ingest => "ingest",
            Self::Indices => "indices",
            Self::Tasks => "tasks",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Explain => "explain",
            Self::Mget => "mget",
            Self::Msearch => "msearch",
            Self::Mtermvectors => "mtermvectors",
            Self::Nodes => "nodes",
            Self::Snapshot => "snapshot",
            Self::Termvectors => "termvectors",
            Self::Source => "source",
            Self::Streams => "streams",
            Self::Misc => "misc",
        }
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Acl {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|acl| acl.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown acl '{value}'"))
    }
}

/// Kind of effect a request has on data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Read, Operation::Write, Operation::Delete];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown operation '{value}'"))
    }
}
