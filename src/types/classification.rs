//! The classifier's per-request output.

use serde::{Deserialize, Serialize};

use super::acl::{Acl, Operation};

/// ACL, operation and target resources derived for one request.
///
/// Created by the classifier, handed by value to the enforcement chain and
/// dropped with the request. An empty resource list marks a cluster-level route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    acl: Acl,
    op: Operation,
    resources: Vec<String>,
}

impl Classification {
    #[must_use]
    pub fn new(acl: Acl, op: Operation, resources: Vec<String>) -> Self {
        Self { acl, op, resources }
    }

    /// Classification used when no endpoint spec matches.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(Acl::Misc, Operation::Read, Vec::new())
    }

    #[must_use]
    pub fn acl(&self) -> Acl {
        self.acl
    }

    #[must_use]
    pub fn op(&self) -> Operation {
        self.op
    }

    #[must_use]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    #[must_use]
    pub fn is_cluster_level(&self) -> bool {
        self.resources.is_empty()
    }

    /// Replace the ACL, keeping operation and resources.
    #[must_use]
    pub(crate) fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = acl;
        self
    }
}
