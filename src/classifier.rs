//! Request classification: method + path to ACL, operation and resources.
//!
//! Specs are tried in registry order and the first one whose path pattern,
//! method set and keywords all match wins. A request that matches nothing is
//! classified as `(misc, read, [])` and logged; that fallback is not an error.

use crate::constants::{INDEX_PLACEHOLDER, KEYWORD_MARKER};
use crate::registry::{EndpointSpec, SpecRegistry};
use crate::types::{Acl, Classification, Method, Operation, RequestParts};

/// Classifies requests against one immutable registry.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    registry: &'r SpecRegistry,
}

impl Classifier<'static> {
    /// Classifier over the process-wide built-in registry.
    #[must_use]
    pub fn with_default_specs() -> Self {
        Self::new(SpecRegistry::default_specs())
    }
}

impl<'r> Classifier<'r> {
    #[must_use]
    pub fn new(registry: &'r SpecRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &'r SpecRegistry {
        self.registry
    }

    /// Classify a normalized request, applying the streaming override.
    #[must_use]
    pub fn classify_request(&self, request: &RequestParts) -> Classification {
        let classification = self.classify(&request.method, &request.path);
        if request.stream {
            classification.with_acl(Acl::Streams)
        } else {
            classification
        }
    }

    /// Classify by method and path alone.
    #[must_use]
    pub fn classify(&self, method: &Method, path: &str) -> Classification {
        match self.find_spec(method, path) {
            Some(spec) => Classification::new(
                spec.acl(),
                get_op(spec.methods(), method),
                get_index_names(spec.template(), path),
            ),
            None => {
                tracing::warn!(
                    target = "esgate::classify",
                    method = %method,
                    path,
                    "no endpoint spec matched; classifying as misc"
                );
                Classification::fallback()
            }
        }
    }

    /// First spec whose pattern, methods and keywords all accept the request.
    #[must_use]
    pub fn find_spec(&self, method: &Method, path: &str) -> Option<&'r EndpointSpec> {
        self.registry.specs().iter().find(|spec| {
            let Some(regex) = spec.regex() else {
                tracing::debug!(
                    target = "esgate::classify",
                    template = spec.template(),
                    "skipping spec with malformed pattern"
                );
                return false;
            };
            regex.is_match(path) && spec.accepts(method) && matches_keywords(spec, path)
        })
    }
}

/// Keyword disambiguation.
///
/// With no keyword segments in the path every spec passes; otherwise at least
/// one of them has to be in the spec's keyword set.
#[must_use]
pub fn matches_keywords(spec: &EndpointSpec, path: &str) -> bool {
    let mut keyword_segments = path
        .split('/')
        .filter(|segment| segment.starts_with(KEYWORD_MARKER))
        .peekable();
    if keyword_segments.peek().is_none() {
        return true;
    }
    keyword_segments.any(|segment| spec.keywords().contains(segment))
}

/// Derive the operation from the request method.
///
/// POST reads when the spec also accepts GET (queries sent as a body), and
/// writes otherwise. Methods outside the known set default to read.
#[must_use]
pub fn get_op(methods: &[Method], method: &Method) -> Operation {
    match method {
        Method::Get | Method::Head => Operation::Read,
        Method::Put => Operation::Write,
        Method::Delete => Operation::Delete,
        Method::Post => {
            if methods.contains(&Method::Get) {
                Operation::Read
            } else {
                Operation::Write
            }
        }
        Method::Other(_) => Operation::Read,
    }
}

/// Resource names addressed by `path` under `template`.
///
/// The segment in the placeholder's position is split on commas and each
/// name trimmed. A template without a placeholder, or a path whose segment
/// count differs from the template's, yields no names.
#[must_use]
pub fn get_index_names(template: &str, path: &str) -> Vec<String> {
    if !template.contains(INDEX_PLACEHOLDER) {
        return Vec::new();
    }

    let template_segments: Vec<&str> = template.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if template_segments.len() != path_segments.len() {
        tracing::warn!(
            target = "esgate::classify",
            path,
            template,
            "segment count mismatch while extracting resource names"
        );
        return Vec::new();
    }

    template_segments
        .iter()
        .position(|segment| *segment == INDEX_PLACEHOLDER)
        .map(|position| {
            path_segments[position]
                .split(',')
                .map(|name| name.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ApiDefinition;

    const DEFS: &[ApiDefinition] = &[
        ApiDefinition {
            name: "broken",
            acl: Acl::Cluster,
            methods: &["GET"],
            paths: &["/{index}/(_search"],
        },
        ApiDefinition {
            name: "search",
            acl: Acl::Search,
            methods: &["GET", "POST"],
            paths: &["/{index}/_search"],
        },
        ApiDefinition {
            name: "bulk",
            acl: Acl::Bulk,
            methods: &["POST"],
            paths: &["/{index}/_bulk"],
        },
        ApiDefinition {
            name: "refresh",
            acl: Acl::Indices,
            methods: &["POST"],
            paths: &["/{index}/_refresh"],
        },
        ApiDefinition {
            name: "catch_all",
            acl: Acl::Cat,
            methods: &["POST"],
            paths: &["/{index}/{action}"],
        },
    ];

    fn registry() -> SpecRegistry {
        SpecRegistry::from_definitions(DEFS)
    }

    #[test]
    fn post_reads_when_spec_accepts_get() {
        let registry = registry();
        let classifier = Classifier::new(&registry);

        let search = classifier.classify(&Method::Post, "/idx/_search");
        assert_eq!(search.acl(), Acl::Search);
        assert_eq!(search.op(), Operation::Read);

        let bulk = classifier.classify(&Method::Post, "/idx/_bulk");
        assert_eq!(bulk.acl(), Acl::Bulk);
        assert_eq!(bulk.op(), Operation::Write);
        assert_eq!(bulk.resources(), ["idx"]);
    }

    #[test]
    fn keyword_segments_disambiguate_shared_shapes() {
        let registry = registry();
        let classifier = Classifier::new(&registry);
        // `/{index}/{action}` also matches the shape but lacks the keyword.
        let refresh = classifier.classify(&Method::Post, "/idx/_refresh");
        assert_eq!(refresh.acl(), Acl::Indices);

        let unknown = classifier.classify(&Method::Post, "/idx/_unknown");
        assert_eq!(unknown, Classification::fallback());

        let plain = classifier.classify(&Method::Post, "/idx/plain");
        assert_eq!(plain.acl(), Acl::Cat);
    }

    #[test]
    fn unmatched_request_falls_back_to_misc_read() {
        let registry = registry();
        let classifier = Classifier::new(&registry);
        let result = classifier.classify(&Method::Delete, "/idx/_search");
        assert_eq!(result.acl(), Acl::Misc);
        assert_eq!(result.op(), Operation::Read);
        assert!(result.resources().is_empty());
    }

    #[test]
    fn stream_parameter_overrides_matched_acl() {
        let registry = registry();
        let classifier = Classifier::new(&registry);
        let request = RequestParts::new("POST", "/idx/_bulk/", Some("stream=true"));
        let result = classifier.classify_request(&request);
        assert_eq!(result.acl(), Acl::Streams);
        assert_eq!(result.op(), Operation::Write);
        assert_eq!(result.resources(), ["idx"]);

        let fallback = classifier.classify_request(&RequestParts::new("GET", "/x/_y", Some("stream=true")));
        assert_eq!(fallback.acl(), Acl::Streams);
    }

    #[test]
    fn get_op_covers_every_method() {
        let get_post = [Method::Get, Method::Post];
        let post_only = [Method::Post];
        assert_eq!(get_op(&get_post, &Method::Get), Operation::Read);
        assert_eq!(get_op(&get_post, &Method::Head), Operation::Read);
        assert_eq!(get_op(&get_post, &Method::Put), Operation::Write);
        assert_eq!(get_op(&get_post, &Method::Delete), Operation::Delete);
        assert_eq!(get_op(&get_post, &Method::Post), Operation::Read);
        assert_eq!(get_op(&post_only, &Method::Post), Operation::Write);
        assert_eq!(
            get_op(&post_only, &Method::Other("PATCH".into())),
            Operation::Read
        );
    }

    #[test]
    fn index_names_split_and_trimmed() {
        assert_eq!(get_index_names("/{index}/_mapping", "/a,b/_mapping"), ["a", "b"]);
        assert_eq!(
            get_index_names("/{index}/_search", "/ logs , metrics /_search"),
            ["logs", "metrics"]
        );
        assert!(get_index_names("/_cluster/health", "/_cluster/health").is_empty());
        assert!(get_index_names("/{index}/_mapping", "/a/b/_mapping").is_empty());
    }

    #[test]
    fn matches_keywords_without_keyword_segments() {
        let registry = registry();
        let bulk = &registry.specs()[2];
        assert!(matches_keywords(bulk, "/idx/doc"));
        assert!(matches_keywords(bulk, "/idx/_bulk"));
        assert!(!matches_keywords(bulk, "/idx/_search"));
    }
}
