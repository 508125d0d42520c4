//! Endpoint spec registry: the routing table used to classify requests.
//!
//! The registry is built once from a static definition set and never mutated.
//! Path templates are compiled to anchored regexes at construction so the
//! per-request classifier only evaluates them.

mod definitions;

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub use definitions::DEFAULT_DEFINITIONS;

use crate::constants::{KEYWORD_MARKER, PLACEHOLDER_SEGMENT_REGEX};
use crate::types::{Acl, Method};

static DEFAULT_REGISTRY: Lazy<SpecRegistry> =
    Lazy::new(|| SpecRegistry::from_definitions(DEFAULT_DEFINITIONS));

/// One API family of the static definition set.
///
/// Every path becomes its own [`EndpointSpec`]; they share the family's ACL,
/// methods and keyword set.
#[derive(Debug, Clone, Copy)]
pub struct ApiDefinition {
    pub name: &'static str,
    pub acl: Acl,
    pub methods: &'static [&'static str],
    pub paths: &'static [&'static str],
}

/// Routing rule mapping a path shape and method set to an ACL.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    api: &'static str,
    template: &'static str,
    regex: Option<Regex>,
    methods: Vec<Method>,
    acl: Acl,
    keywords: BTreeSet<String>,
}

impl EndpointSpec {
    fn new(definition: &ApiDefinition, template: &'static str, keywords: BTreeSet<String>) -> Self {
        let pattern = template_regex(template);
        let regex = match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::warn!(
                    target = "esgate::registry",
                    api = definition.name,
                    template,
                    error = %err,
                    "malformed endpoint pattern; spec will never match"
                );
                None
            }
        };
        Self {
            api: definition.name,
            template,
            regex,
            methods: definition.methods.iter().map(|m| Method::parse(m)).collect(),
            acl: definition.acl,
            keywords,
        }
    }

    #[must_use]
    pub fn api(&self) -> &'static str {
        self.api
    }

    /// Path template with `{name}` placeholders, as written in the definition set.
    #[must_use]
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Compiled pattern, `None` if the template failed to compile.
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    #[must_use]
    pub fn acl(&self) -> Acl {
        self.acl
    }

    #[must_use]
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }
}

/// Ordered, immutable sequence of endpoint specs.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: Vec<EndpointSpec>,
}

impl SpecRegistry {
    #[must_use]
    pub fn from_definitions(definitions: &[ApiDefinition]) -> Self {
        let mut specs = Vec::new();
        for definition in definitions {
            let keywords: BTreeSet<String> = definition
                .paths
                .iter()
                .flat_map(|path| path.split('/'))
                .filter(|segment| segment.starts_with(KEYWORD_MARKER))
                .map(str::to_string)
                .collect();
            for &template in definition.paths {
                specs.push(EndpointSpec::new(definition, template, keywords.clone()));
            }
        }
        tracing::debug!(
            target = "esgate::registry",
            apis = definitions.len(),
            specs = specs.len(),
            "endpoint spec registry built"
        );
        Self { specs }
    }

    /// Process-wide registry built from [`DEFAULT_DEFINITIONS`] on first use.
    #[must_use]
    pub fn default_specs() -> &'static SpecRegistry {
        &DEFAULT_REGISTRY
    }

    #[must_use]
    pub fn specs(&self) -> &[EndpointSpec] {
        &self.specs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Anchored regex for a path template; each `{name}` segment matches one path segment.
#[must_use]
pub fn template_regex(template: &str) -> String {
    let body = template
        .split('/')
        .map(|segment| {
            if is_placeholder(segment) {
                PLACEHOLDER_SEGMENT_REGEX
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("^{body}$")
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}
