use std::fmt::Debug;

use serde_json::{Value, json};

use super::StorageVersion;
use crate::types::PatchFields;

/// Version-specific shape of permission documents in the cluster.
pub trait DocumentLayout: Send + Sync + Debug {
    fn version(&self) -> StorageVersion;

    fn document_path(&self, index: &str, id: &str) -> String {
        format!("/{index}/_doc/{id}")
    }

    fn update_path(&self, index: &str, id: &str) -> String;

    fn search_path(&self, index: &str) -> String {
        format!("/{index}/_search")
    }

    /// Request body for a partial update.
    fn update_body(&self, patch: &PatchFields) -> Value {
        json!({ "doc": patch })
    }

    /// Response the cluster sends back for a successful update.
    fn update_response(&self, index: &str, id: &str, version: u64) -> Value;

    /// `hits.total` as the cluster reports it.
    fn hits_total(&self, total: usize) -> Value;
}

/// Clusters on 6.x: typed `_doc` update endpoint, numeric hit totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Es6Layout;

impl DocumentLayout for Es6Layout {
    fn version(&self) -> StorageVersion {
        StorageVersion::V6
    }

    fn update_path(&self, index: &str, id: &str) -> String {
        format!("/{index}/_doc/{id}/_update")
    }

    fn update_response(&self, index: &str, id: &str, version: u64) -> Value {
        json!({
            "_index": index,
            "_type": "_doc",
            "_id": id,
            "_version": version,
            "result": "updated",
        })
    }

    fn hits_total(&self, total: usize) -> Value {
        json!(total)
    }
}

/// Clusters on 7.x and later: typeless update endpoint, object hit totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Es7Layout;

impl DocumentLayout for Es7Layout {
    fn version(&self) -> StorageVersion {
        StorageVersion::V7
    }

    fn update_path(&self, index: &str, id: &str) -> String {
        format!("/{index}/_update/{id}")
    }

    fn update_response(&self, index: &str, id: &str, version: u64) -> Value {
        json!({
            "_index": index,
            "_id": id,
            "_version": version,
            "result": "updated",
        })
    }

    fn hits_total(&self, total: usize) -> Value {
        json!({ "value": total, "relation": "eq" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_paths_differ_by_version() {
        let v6 = StorageVersion::V6.layout();
        let v7 = StorageVersion::V7.layout();
        assert_eq!(v6.update_path(".permissions", "bob"), "/.permissions/_doc/bob/_update");
        assert_eq!(v7.update_path(".permissions", "bob"), "/.permissions/_update/bob");
        assert_eq!(v6.document_path(".permissions", "bob"), v7.document_path(".permissions", "bob"));
    }

    #[test]
    fn only_v6_responses_carry_a_type() {
        let v6 = Es6Layout.update_response("p", "bob", 2);
        let v7 = Es7Layout.update_response("p", "bob", 2);
        assert_eq!(v6["_type"], "_doc");
        assert!(v7.get("_type").is_none());
        assert_eq!(Es7Layout.hits_total(3)["value"], 3);
        assert_eq!(Es6Layout.hits_total(3), 3);
    }

    #[test]
    fn update_body_wraps_patch_in_doc() {
        let mut patch = PatchFields::new();
        patch.insert("email".into(), Value::String("x@example.com".into()));
        let body = Es7Layout.update_body(&patch);
        assert_eq!(body["doc"]["email"], "x@example.com");
    }

    #[test]
    fn unknown_majors_use_v7() {
        assert_eq!(StorageVersion::from_major(6), StorageVersion::V6);
        assert_eq!(StorageVersion::from_major(8), StorageVersion::V7);
    }
}
