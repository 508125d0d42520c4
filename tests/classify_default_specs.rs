//! Classification against the built-in endpoint table.

use esgate_core::{Acl, Classification, Classifier, Method, Operation, RequestParts};
use proptest::prelude::*;

fn classify(method: &str, path: &str) -> Classification {
    Classifier::with_default_specs().classify_request(&RequestParts::new(method, path, None))
}

#[test]
fn document_routes() {
    let get = classify("GET", "/logs/_doc/1");
    assert_eq!((get.acl(), get.op()), (Acl::Get, Operation::Read));
    assert_eq!(get.resources(), ["logs"]);

    let head = classify("HEAD", "/logs/_doc/1");
    assert_eq!((head.acl(), head.op()), (Acl::Exists, Operation::Read));

    let put = classify("PUT", "/logs/_doc/1");
    assert_eq!((put.acl(), put.op()), (Acl::Create, Operation::Write));

    let delete = classify("DELETE", "/logs/_doc/1");
    assert_eq!((delete.acl(), delete.op()), (Acl::Delete, Operation::Delete));

    let update = classify("POST", "/logs/_update/1");
    assert_eq!((update.acl(), update.op()), (Acl::Update, Operation::Write));
}

#[test]
fn post_dual_mode_on_real_table() {
    let search = classify("POST", "/idx/_search");
    assert_eq!((search.acl(), search.op()), (Acl::Search, Operation::Read));

    let bulk = classify("POST", "/idx/_bulk");
    assert_eq!((bulk.acl(), bulk.op()), (Acl::Bulk, Operation::Write));
}

#[test]
fn resource_names_from_comma_list() {
    let mapping = classify("GET", "/a,b/_mapping");
    assert_eq!(mapping.acl(), Acl::Indices);
    assert_eq!(mapping.resources(), ["a", "b"]);
}

#[test]
fn trailing_slash_is_ignored() {
    assert_eq!(classify("GET", "/logs/_search/"), classify("GET", "/logs/_search"));
    assert_eq!(classify("GET", "/").acl(), Acl::Misc);
}

#[test]
fn cluster_routes_have_no_resources() {
    for (path, acl) in [
        ("/_cluster/health", Acl::Cluster),
        ("/_nodes", Acl::Nodes),
        ("/_tasks", Acl::Tasks),
        ("/_snapshot/repo", Acl::Snapshot),
        ("/_remote/info", Acl::Remote),
        ("/_cat", Acl::Cat),
    ] {
        let result = classify("GET", path);
        assert_eq!(result.acl(), acl, "{path}");
        assert!(result.is_cluster_level(), "{path}");
    }
}

#[test]
fn cat_with_index_extracts_it() {
    let result = classify("GET", "/_cat/shards/logs");
    assert_eq!(result.acl(), Acl::Cat);
    assert_eq!(result.resources(), ["logs"]);
}

#[test]
fn clear_scroll_is_a_delete() {
    let result = classify("DELETE", "/_search/scroll");
    assert_eq!((result.acl(), result.op()), (Acl::Search, Operation::Delete));
}

#[test]
fn bare_index_route_only_without_keywords() {
    let create = classify("PUT", "/logs");
    assert_eq!((create.acl(), create.op()), (Acl::Indices, Operation::Write));
    assert_eq!(create.resources(), ["logs"]);

    assert_eq!(classify("PUT", "/_unknown"), Classification::fallback());
}

#[test]
fn stream_flag_wins_over_matched_acl() {
    let classifier = Classifier::with_default_specs();
    let request = RequestParts::new("POST", "/logs/_bulk", Some("refresh=true&stream=true"));
    let result = classifier.classify_request(&request);
    assert_eq!(result.acl(), Acl::Streams);
    assert_eq!(result.op(), Operation::Write);

    let not_streaming = RequestParts::new("POST", "/logs/_bulk", Some("stream=false"));
    assert_eq!(classifier.classify_request(&not_streaming).acl(), Acl::Bulk);
}

#[test]
fn unknown_method_defaults_to_read() {
    let classifier = Classifier::with_default_specs();
    let result = classifier.classify(&Method::parse("PATCH"), "/logs/_search");
    assert_eq!(result, Classification::fallback());
}

fn method() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
}

proptest! {
    #[test]
    fn classification_is_deterministic(method in method(), path in "(/[a-z_,]{1,8}){0,4}/?") {
        let first = classify(method, &path);
        let second = classify(method, &path);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unmatched_paths_fall_back(method in method(), path in "(/_q[a-z]{1,6}){1,3}") {
        prop_assert_eq!(classify(method, &path), Classification::fallback());
    }
}
