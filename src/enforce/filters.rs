use super::{RequestFilter, RequestScope};
use crate::constants::WILDCARD_RESOURCE;
use crate::types::{Classification, CompiledPermission};
use crate::{GateError, Result};

fn require<'a>(
    filter: &'static str,
    scope: &RequestScope<'a>,
) -> Result<(&'a Classification, &'a CompiledPermission)> {
    let classification = scope.classification.ok_or(GateError::PipelineInvariant {
        filter,
        missing: "classification",
    })?;
    let permission = scope.permission.ok_or(GateError::PipelineInvariant {
        filter,
        missing: "permission",
    })?;
    Ok((classification, permission))
}

/// Denies unless the caller holds the request's ACL.
#[derive(Debug, Clone, Copy, Default)]
pub struct AclFilter;

impl RequestFilter for AclFilter {
    fn name(&self) -> &'static str {
        "acl"
    }

    fn check(&self, scope: &RequestScope<'_>) -> Result<()> {
        let (classification, permission) = require(self.name(), scope)?;
        if permission.has_acl(classification.acl()) {
            return Ok(());
        }
        Err(GateError::unauthorized(format!(
            "permission with username={} does not have '{}' acl",
            permission.username(),
            classification.acl()
        )))
    }
}

/// Denies unless the caller may perform the request's operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationFilter;

impl RequestFilter for OperationFilter {
    fn name(&self) -> &'static str {
        "operation"
    }

    fn check(&self, scope: &RequestScope<'_>) -> Result<()> {
        let (classification, permission) = require(self.name(), scope)?;
        if permission.can_do(classification.op()) {
            return Ok(());
        }
        Err(GateError::unauthorized(format!(
            "permission with username={} does not have '{}' operation",
            permission.username(),
            classification.op()
        )))
    }
}

/// Checks the request's resources against the caller's patterns.
///
/// Cluster-level requests (no resources) need access to `*`. For named
/// resources every stored pattern has to match every name, which is stricter
/// than [`CompiledPermission::can_access_resource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceFilter;

impl RequestFilter for ResourceFilter {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn check(&self, scope: &RequestScope<'_>) -> Result<()> {
        let (classification, permission) = require(self.name(), scope)?;

        if classification.is_cluster_level() {
            if permission.can_access_resource(WILDCARD_RESOURCE) {
                return Ok(());
            }
            return Err(GateError::unauthorized(
                "User is unauthorized to access cluster level routes",
            ));
        }

        for name in classification.resources() {
            if let Some(pattern) = permission.first_mismatch(name) {
                tracing::debug!(
                    target = "esgate::enforce",
                    resource = name.as_str(),
                    pattern,
                    "resource rejected by pattern"
                );
                return Err(GateError::unauthorized(format!(
                    "User is unauthorized to access index {name}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforce::EnforcementChain;
    use crate::types::{Acl, NewPermission, Operation};

    fn caller(indices: &[&str]) -> CompiledPermission {
        NewPermission::new("dana", "pw", false)
            .with_acls([Acl::Search, Acl::Indices])
            .with_ops([Operation::Read])
            .with_indices(indices.iter().copied())
            .into_permission("hash".into(), "argon2")
            .compile()
            .unwrap()
    }

    fn search(resources: &[&str]) -> Classification {
        Classification::new(
            Acl::Search,
            Operation::Read,
            resources.iter().map(|name| (*name).to_string()).collect(),
        )
    }

    #[test]
    fn acl_filter_names_missing_acl() {
        let permission = caller(&["*"]);
        let classification = Classification::new(Acl::Bulk, Operation::Write, vec![]);
        let err = AclFilter
            .check(&RequestScope::new(&classification, &permission))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "permission with username=dana does not have 'bulk' acl"
        );
    }

    #[test]
    fn operation_filter_names_missing_operation() {
        let permission = caller(&["*"]);
        let classification = Classification::new(Acl::Search, Operation::Delete, vec![]);
        let err = OperationFilter
            .check(&RequestScope::new(&classification, &permission))
            .unwrap_err();
        assert!(err.to_string().contains("'delete' operation"));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn or_and_asymmetry_between_check_and_filter() {
        let permission = caller(&["prod-.*", "staging-.*"]);
        assert!(permission.can_access_resource("prod-1"));

        let classification = search(&["prod-1"]);
        let err = ResourceFilter
            .check(&RequestScope::new(&classification, &permission))
            .unwrap_err();
        assert_eq!(err.to_string(), "User is unauthorized to access index prod-1");
    }

    #[test]
    fn cluster_level_requires_wildcard() {
        let classification = search(&[]);

        let wildcard = caller(&["*"]);
        assert!(ResourceFilter
            .check(&RequestScope::new(&classification, &wildcard))
            .is_ok());

        let scoped = caller(&["logs-.*"]);
        let err = ResourceFilter
            .check(&RequestScope::new(&classification, &scoped))
            .unwrap_err();
        assert!(err.to_string().contains("cluster level"));
        assert!(!err.is_internal());
    }

    #[test]
    fn every_resource_must_pass() {
        let permission = caller(&["logs-.*"]);
        let ok = search(&["logs-a", "logs-b"]);
        assert!(ResourceFilter
            .check(&RequestScope::new(&ok, &permission))
            .is_ok());
        let mixed = search(&["logs-a", "metrics-b"]);
        assert!(ResourceFilter
            .check(&RequestScope::new(&mixed, &permission))
            .is_err());
    }

    #[test]
    fn missing_scope_values_are_pipeline_errors() {
        let permission = caller(&["*"]);
        let scope = RequestScope {
            classification: None,
            permission: Some(&permission),
        };
        for filter in EnforcementChain::default().filters() {
            let err = filter.check(&scope).unwrap_err();
            assert!(err.is_internal(), "{} should report a pipeline error", filter.name());
            assert_eq!(err.status_code(), 500);
        }
    }

    #[test]
    fn chain_stops_at_first_failure() {
        // Lacks both the ACL and the operation; the ACL message wins.
        let permission = caller(&["*"]);
        let classification = Classification::new(Acl::Bulk, Operation::Write, vec!["x".into()]);
        let err = EnforcementChain::default()
            .enforce(&RequestScope::new(&classification, &permission))
            .unwrap_err();
        assert!(err.to_string().ends_with("'bulk' acl"));
    }
}
