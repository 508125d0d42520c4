//! Built-in endpoint definitions for the search cluster's REST API.
//!
//! Order matters: the classifier takes the first spec that matches, so
//! families with literal keyword segments come before the bare `/{index}`
//! family.

use super::ApiDefinition;
use crate::types::Acl;

const GET: &str = "GET";
const HEAD: &str = "HEAD";
const POST: &str = "POST";
const PUT: &str = "PUT";
const DELETE: &str = "DELETE";

pub const DEFAULT_DEFINITIONS: &[ApiDefinition] = &[
    ApiDefinition {
        name: "info",
        acl: Acl::Misc,
        methods: &[GET, HEAD],
        paths: &["/"],
    },
    // documents
    ApiDefinition {
        name: "get",
        acl: Acl::Get,
        methods: &[GET],
        paths: &["/{index}/_doc/{id}"],
    },
    ApiDefinition {
        name: "exists",
        acl: Acl::Exists,
        methods: &[HEAD],
        paths: &["/{index}/_doc/{id}", "/{index}/_source/{id}"],
    },
    ApiDefinition {
        name: "get_source",
        acl: Acl::Source,
        methods: &[GET],
        paths: &["/{index}/_source/{id}"],
    },
    ApiDefinition {
        name: "index",
        acl: Acl::Create,
        methods: &[PUT, POST],
        paths: &["/{index}/_doc/{id}", "/{index}/_doc", "/{index}/_create/{id}"],
    },
    ApiDefinition {
        name: "update",
        acl: Acl::Update,
        methods: &[POST],
        paths: &["/{index}/_update/{id}", "/{index}/_update_by_query"],
    },
    ApiDefinition {
        name: "delete",
        acl: Acl::Delete,
        methods: &[DELETE],
        paths: &["/{index}/_doc/{id}"],
    },
    ApiDefinition {
        name: "delete_by_query",
        acl: Acl::Delete,
        methods: &[POST],
        paths: &["/{index}/_delete_by_query"],
    },
    ApiDefinition {
        name: "bulk",
        acl: Acl::Bulk,
        methods: &[POST, PUT],
        paths: &["/_bulk", "/{index}/_bulk"],
    },
    ApiDefinition {
        name: "mget",
        acl: Acl::Mget,
        methods: &[GET, POST],
        paths: &["/_mget", "/{index}/_mget"],
    },
    ApiDefinition {
        name: "reindex",
        acl: Acl::Reindex,
        methods: &[POST],
        paths: &["/_reindex", "/_reindex/{task_id}/_rethrottle"],
    },
    // search
    ApiDefinition {
        name: "search",
        acl: Acl::Search,
        methods: &[GET, POST],
        paths: &[
            "/_search",
            "/{index}/_search",
            "/_search/scroll",
            "/_search/scroll/{scroll_id}",
            "/_search/template",
            "/{index}/_search/template",
            "/{index}/_search_shards",
        ],
    },
    ApiDefinition {
        name: "clear_scroll",
        acl: Acl::Search,
        methods: &[DELETE],
        paths: &["/_search/scroll", "/_search/scroll/{scroll_id}"],
    },
    ApiDefinition {
        name: "msearch",
        acl: Acl::Msearch,
        methods: &[GET, POST],
        paths: &[
            "/_msearch",
            "/{index}/_msearch",
            "/_msearch/template",
            "/{index}/_msearch/template",
        ],
    },
    ApiDefinition {
        name: "count",
        acl: Acl::Count,
        methods: &[GET, POST],
        paths: &["/_count", "/{index}/_count"],
    },
    ApiDefinition {
        name: "explain",
        acl: Acl::Explain,
        methods: &[GET, POST],
        paths: &["/{index}/_explain/{id}"],
    },
    ApiDefinition {
        name: "field_caps",
        acl: Acl::FieldCaps,
        methods: &[GET, POST],
        paths: &["/_field_caps", "/{index}/_field_caps"],
    },
    ApiDefinition {
        name: "termvectors",
        acl: Acl::Termvectors,
        methods: &[GET, POST],
        paths: &["/{index}/_termvectors", "/{index}/_termvectors/{id}"],
    },
    ApiDefinition {
        name: "mtermvectors",
        acl: Acl::Mtermvectors,
        methods: &[GET, POST],
        paths: &["/_mtermvectors", "/{index}/_mtermvectors"],
    },
    // scripts and pipelines
    ApiDefinition {
        name: "render_search_template",
        acl: Acl::Scripts,
        methods: &[GET, POST],
        paths: &["/_render/template", "/_render/template/{id}"],
    },
    ApiDefinition {
        name: "scripts",
        acl: Acl::Scripts,
        methods: &[GET, PUT, POST, DELETE],
        paths: &["/_scripts/{id}", "/_scripts/{id}/{context}"],
    },
    ApiDefinition {
        name: "ingest.simulate",
        acl: Acl::Ingest,
        methods: &[GET, POST],
        paths: &["/_ingest/pipeline/_simulate", "/_ingest/pipeline/{id}/_simulate"],
    },
    ApiDefinition {
        name: "ingest.pipeline",
        acl: Acl::Ingest,
        methods: &[GET, PUT, DELETE],
        paths: &["/_ingest/pipeline", "/_ingest/pipeline/{id}"],
    },
    // index administration
    ApiDefinition {
        name: "indices.mapping",
        acl: Acl::Indices,
        methods: &[GET, PUT, POST],
        paths: &[
            "/_mapping",
            "/{index}/_mapping",
            "/_mapping/field/{fields}",
            "/{index}/_mapping/field/{fields}",
        ],
    },
    ApiDefinition {
        name: "indices.settings",
        acl: Acl::Indices,
        methods: &[GET, PUT],
        paths: &["/_settings", "/{index}/_settings", "/{index}/_settings/{name}"],
    },
    ApiDefinition {
        name: "indices.maintenance",
        acl: Acl::Indices,
        methods: &[GET, POST],
        paths: &[
            "/_refresh",
            "/{index}/_refresh",
            "/_flush",
            "/{index}/_flush",
            "/_forcemerge",
            "/{index}/_forcemerge",
            "/_cache/clear",
            "/{index}/_cache/clear",
        ],
    },
    ApiDefinition {
        name: "indices.open_close",
        acl: Acl::Indices,
        methods: &[POST],
        paths: &["/{index}/_open", "/{index}/_close"],
    },
    ApiDefinition {
        name: "indices.alias",
        acl: Acl::Indices,
        methods: &[GET, HEAD, PUT, DELETE],
        paths: &[
            "/_alias",
            "/_alias/{name}",
            "/{index}/_alias",
            "/{index}/_alias/{name}",
        ],
    },
    ApiDefinition {
        name: "indices.update_aliases",
        acl: Acl::Indices,
        methods: &[POST],
        paths: &["/_aliases"],
    },
    ApiDefinition {
        name: "indices.stats",
        acl: Acl::Indices,
        methods: &[GET],
        paths: &[
            "/_stats",
            "/_stats/{metric}",
            "/{index}/_stats",
            "/{index}/_stats/{metric}",
        ],
    },
    ApiDefinition {
        name: "indices.template",
        acl: Acl::Indices,
        methods: &[GET, HEAD, PUT, POST, DELETE],
        paths: &["/_template", "/_template/{name}"],
    },
    ApiDefinition {
        name: "indices.analyze",
        acl: Acl::Indices,
        methods: &[GET, POST],
        paths: &["/_analyze", "/{index}/_analyze"],
    },
    ApiDefinition {
        name: "indices.validate_query",
        acl: Acl::Indices,
        methods: &[GET, POST],
        paths: &["/_validate/query", "/{index}/_validate/query"],
    },
    // cluster
    ApiDefinition {
        name: "cat",
        acl: Acl::Cat,
        methods: &[GET],
        paths: &["/_cat", "/_cat/{endpoint}", "/_cat/{endpoint}/{index}"],
    },
    ApiDefinition {
        name: "cluster.read",
        acl: Acl::Cluster,
        methods: &[GET],
        paths: &[
            "/_cluster/health",
            "/_cluster/health/{index}",
            "/_cluster/state",
            "/_cluster/state/{metric}",
            "/_cluster/state/{metric}/{index}",
            "/_cluster/stats",
            "/_cluster/pending_tasks",
            "/_cluster/settings",
        ],
    },
    ApiDefinition {
        name: "cluster.write",
        acl: Acl::Cluster,
        methods: &[PUT, POST],
        paths: &["/_cluster/settings", "/_cluster/reroute"],
    },
    ApiDefinition {
        name: "cluster.allocation_explain",
        acl: Acl::Cluster,
        methods: &[GET, POST],
        paths: &["/_cluster/allocation/explain"],
    },
    ApiDefinition {
        name: "nodes",
        acl: Acl::Nodes,
        methods: &[GET],
        paths: &[
            "/_nodes",
            "/_nodes/{node_id}",
            "/_nodes/{node_id}/{metric}",
            "/_nodes/{node_id}/{metric}/{index_metric}",
        ],
    },
    ApiDefinition {
        name: "tasks.get",
        acl: Acl::Tasks,
        methods: &[GET],
        paths: &["/_tasks", "/_tasks/{task_id}"],
    },
    ApiDefinition {
        name: "tasks.cancel",
        acl: Acl::Tasks,
        methods: &[POST],
        paths: &["/_tasks/_cancel", "/_tasks/{task_id}/_cancel"],
    },
    ApiDefinition {
        name: "snapshot.get",
        acl: Acl::Snapshot,
        methods: &[GET],
        paths: &[
            "/_snapshot",
            "/_snapshot/{repository}",
            "/_snapshot/{repository}/{snapshot}",
            "/_snapshot/{repository}/{snapshot}/_status",
        ],
    },
    ApiDefinition {
        name: "snapshot.write",
        acl: Acl::Snapshot,
        methods: &[PUT, POST],
        paths: &[
            "/_snapshot/{repository}",
            "/_snapshot/{repository}/{snapshot}",
            "/_snapshot/{repository}/{snapshot}/_restore",
        ],
    },
    ApiDefinition {
        name: "snapshot.delete",
        acl: Acl::Snapshot,
        methods: &[DELETE],
        paths: &["/_snapshot/{repository}", "/_snapshot/{repository}/{snapshot}"],
    },
    ApiDefinition {
        name: "remote.info",
        acl: Acl::Remote,
        methods: &[GET],
        paths: &["/_remote/info"],
    },
    // Keeps an empty keyword set, so it only matches paths without `_` segments.
    ApiDefinition {
        name: "indices",
        acl: Acl::Indices,
        methods: &[GET, HEAD, PUT, DELETE],
        paths: &["/{index}"],
    },
];
