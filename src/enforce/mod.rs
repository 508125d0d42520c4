//! Enforcement chain: ACL, operation and resource checks.
//!
//! Filters run in order and the first failure ends the request. A filter that
//! finds the request scope incomplete reports a pipeline error rather than a
//! denial, so a broken pipeline is never mistaken for a caller without rights.

mod filters;

pub use filters::{AclFilter, OperationFilter, ResourceFilter};

use crate::Result;
use crate::types::{Classification, CompiledPermission};

/// Values a request carries into the enforcement chain.
///
/// Passed by parameter from the classification step; nothing is read from
/// ambient request state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestScope<'a> {
    pub classification: Option<&'a Classification>,
    pub permission: Option<&'a CompiledPermission>,
}

impl<'a> RequestScope<'a> {
    #[must_use]
    pub fn new(classification: &'a Classification, permission: &'a CompiledPermission) -> Self {
        Self {
            classification: Some(classification),
            permission: Some(permission),
        }
    }
}

/// One authorization check over a request scope.
pub trait RequestFilter: Send + Sync {
    /// Name used in logs and pipeline errors.
    fn name(&self) -> &'static str;

    /// `Ok(())` lets the request through to the next filter.
    fn check(&self, scope: &RequestScope<'_>) -> Result<()>;
}

/// Ordered, short-circuiting sequence of filters.
pub struct EnforcementChain {
    filters: Vec<Box<dyn RequestFilter>>,
}

impl EnforcementChain {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn push<F>(&mut self, filter: F)
    where
        F: RequestFilter + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    #[must_use]
    pub fn filters(&self) -> &[Box<dyn RequestFilter>] {
        &self.filters
    }

    /// Run every filter in order, stopping at the first failure.
    pub fn enforce(&self, scope: &RequestScope<'_>) -> Result<()> {
        for filter in &self.filters {
            if let Err(err) = filter.check(scope) {
                if err.is_internal() {
                    tracing::error!(
                        target = "esgate::enforce",
                        filter = filter.name(),
                        error = %err,
                        "enforcement pipeline error"
                    );
                } else {
                    tracing::info!(
                        target = "esgate::enforce",
                        filter = filter.name(),
                        username = scope.permission.map(CompiledPermission::username),
                        reason = %err,
                        "request denied"
                    );
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for EnforcementChain {
    /// ACL, then operation, then resources.
    fn default() -> Self {
        let mut chain = Self::empty();
        chain.push(AclFilter);
        chain.push(OperationFilter);
        chain.push(ResourceFilter);
        chain
    }
}

impl std::fmt::Debug for EnforcementChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}
