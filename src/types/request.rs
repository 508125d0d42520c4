//! Per-request inputs consumed by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STREAM_PARAM;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    /// Any method outside the set the endpoint specs are written against.
    Other(String),
}

impl Method {
    /// Parse a request-line method, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Normalized view of an inbound request: method, path without a trailing
/// slash, and whether the caller asked for streaming mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub method: Method,
    pub path: String,
    pub stream: bool,
}

impl RequestParts {
    /// Build from raw request pieces using the default `stream` parameter name.
    #[must_use]
    pub fn new(method: &str, path: &str, query: Option<&str>) -> Self {
        Self::with_stream_param(method, path, query, DEFAULT_STREAM_PARAM)
    }

    #[must_use]
    pub fn with_stream_param(
        method: &str,
        path: &str,
        query: Option<&str>,
        stream_param: &str,
    ) -> Self {
        // Only the first occurrence of the parameter counts.
        let stream = query.is_some_and(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == stream_param)
                .is_some_and(|(_, value)| value == "true")
        });
        Self {
            method: Method::parse(method),
            path: normalize_path(path).to_string(),
            stream,
        }
    }
}

/// Strip one trailing `/`, keeping the root path intact.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
