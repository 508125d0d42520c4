//! Enforcement chain behavior over classified requests.

use esgate_core::{
    Acl, Classification, Classifier, CompiledPermission, EnforcementChain, GateError,
    NewPermission, Operation, RequestParts, RequestScope, Result,
};

fn compiled(record: NewPermission) -> Result<CompiledPermission> {
    record.into_permission("hash".to_string(), "argon2").compile()
}

fn classify(method: &str, path: &str) -> Classification {
    Classifier::with_default_specs().classify_request(&RequestParts::new(method, path, None))
}

fn denial(err: GateError) -> String {
    assert_eq!(err.status_code(), 401, "{err:?}");
    err.public_message()
}

#[test]
fn or_and_asymmetry_holds_at_once() -> Result<()> {
    let permission = compiled(
        NewPermission::new("pat", "pw", false).with_indices(["prod-.*", "staging-.*"]),
    )?;

    // Direct check: any pattern is enough.
    assert!(permission.can_access_resource("prod-1"));

    // The resource filter wants every pattern to match.
    let search = classify("GET", "/prod-1/_search");
    let err = EnforcementChain::default()
        .enforce(&RequestScope::new(&search, &permission))
        .unwrap_err();
    assert_eq!(denial(err), "User is unauthorized to access index prod-1");
    Ok(())
}

#[test]
fn cluster_routes_need_the_wildcard() -> Result<()> {
    let chain = EnforcementChain::default();
    let health = classify("GET", "/_cluster/health");

    let scoped = compiled(
        NewPermission::new("sam", "pw", false)
            .with_acls([Acl::Cluster])
            .with_indices(["logs-*"]),
    )?;
    let err = chain
        .enforce(&RequestScope::new(&health, &scoped))
        .unwrap_err();
    assert!(denial(err).contains("cluster level"));

    let global = compiled(
        NewPermission::new("sam", "pw", false)
            .with_acls([Acl::Cluster])
            .with_indices(["*"]),
    )?;
    chain.enforce(&RequestScope::new(&health, &global))?;
    Ok(())
}

#[test]
fn filters_run_in_order() -> Result<()> {
    let chain = EnforcementChain::default();
    // Lacks the ACL, the operation and the index: the ACL denial wins.
    let permission = compiled(NewPermission::new("lee", "pw", false).with_indices(["other"]))?;
    let bulk = classify("POST", "/logs/_bulk");

    let err = chain
        .enforce(&RequestScope::new(&bulk, &permission))
        .unwrap_err();
    assert_eq!(
        denial(err),
        "permission with username=lee does not have 'bulk' acl"
    );

    let with_acl = compiled(
        NewPermission::new("lee", "pw", false)
            .with_acls([Acl::Bulk])
            .with_indices(["other"]),
    )?;
    let err = chain
        .enforce(&RequestScope::new(&bulk, &with_acl))
        .unwrap_err();
    assert_eq!(
        denial(err),
        "permission with username=lee does not have 'write' operation"
    );
    Ok(())
}

#[test]
fn wildcard_admin_passes_everything() -> Result<()> {
    let chain = EnforcementChain::default();
    let admin = compiled(NewPermission::admin("root", "pw"))?;
    for (method, path) in [
        ("GET", "/(odd)+name/_search"),
        ("POST", "/logs/_bulk"),
        ("DELETE", "/logs/_doc/7"),
        ("PUT", "/_cluster/settings"),
        ("GET", "/_unrouted/thing"),
    ] {
        let classification = classify(method, path);
        chain.enforce(&RequestScope::new(&classification, &admin))?;
    }
    Ok(())
}

#[test]
fn every_resource_is_checked() -> Result<()> {
    let permission = compiled(
        NewPermission::new("kim", "pw", false)
            .with_ops([Operation::Read])
            .with_indices(["logs-*"]),
    )?;
    let chain = EnforcementChain::default();

    let allowed = classify("GET", "/logs-a,logs-b/_search");
    chain.enforce(&RequestScope::new(&allowed, &permission))?;

    let mixed = classify("GET", "/logs-a,metrics/_search");
    let err = chain
        .enforce(&RequestScope::new(&mixed, &permission))
        .unwrap_err();
    assert_eq!(denial(err), "User is unauthorized to access index metrics");
    Ok(())
}

#[test]
fn missing_scope_is_a_pipeline_error_not_a_denial() -> Result<()> {
    let permission = compiled(NewPermission::admin("root", "pw"))?;
    let scope = RequestScope {
        classification: None,
        permission: Some(&permission),
    };
    let err = EnforcementChain::default().enforce(&scope).unwrap_err();
    assert!(matches!(err, GateError::PipelineInvariant { .. }));
    assert!(err.is_internal());
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.public_message(), esgate_core::GENERIC_INTERNAL_MESSAGE);
    Ok(())
}
