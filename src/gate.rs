//! Request authorization: classify, load the caller's permission, enforce.

use tokio_util::sync::CancellationToken;

use crate::classifier::Classifier;
use crate::config::GateConfig;
use crate::enforce::{EnforcementChain, RequestScope};
use crate::storage::PermissionStore;
use crate::types::{Classification, CompiledPermission, RequestParts};
use crate::{GateError, Result};

/// Outcome of a request that passed every filter.
#[derive(Debug, Clone)]
pub struct Authorization {
    pub classification: Classification,
    pub permission: CompiledPermission,
}

/// Authorization front door for the proxy.
///
/// Holds the immutable classifier and filter chain plus the storage
/// collaborator. Shared across request tasks by reference or `Arc`.
#[derive(Debug)]
pub struct Gate<S> {
    classifier: Classifier<'static>,
    chain: EnforcementChain,
    store: S,
    config: GateConfig,
}

impl<S: PermissionStore> Gate<S> {
    /// Gate over the built-in endpoint specs and the default filter chain.
    pub fn new(store: S, config: GateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::with_default_specs(),
            chain: EnforcementChain::default(),
            store,
            config,
        })
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier<'static>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_chain(mut self, chain: EnforcementChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn classifier(&self) -> Classifier<'static> {
        self.classifier
    }

    /// Normalize raw request pieces with the configured stream parameter.
    #[must_use]
    pub fn request_parts(&self, method: &str, path: &str, query: Option<&str>) -> RequestParts {
        RequestParts::with_stream_param(method, path, query, &self.config.stream_param)
    }

    #[must_use]
    pub fn classify(&self, method: &str, path: &str, query: Option<&str>) -> Classification {
        self.classifier
            .classify_request(&self.request_parts(method, path, query))
    }

    /// Fetch and compile the caller's permission.
    ///
    /// The lookup is abandoned when `cancel` fires or the configured timeout
    /// elapses. An unknown caller is unauthorized.
    pub async fn load_permission(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<CompiledPermission> {
        let timeout = self.config.lookup_timeout();
        let lookup = tokio::time::timeout(timeout, self.store.get(username));

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(target = "esgate::gate", username, "request cancelled during permission lookup");
                return Err(GateError::Cancelled);
            }
            fetched = lookup => fetched,
        };

        let permission = match fetched {
            Ok(Ok(permission)) => permission,
            Ok(Err(GateError::PermissionNotFound { username })) => {
                return Err(GateError::unauthorized(format!(
                    "permission with username={username} not found"
                )));
            }
            Ok(Err(err)) => {
                tracing::error!(target = "esgate::gate", username, error = %err, "permission lookup failed");
                return Err(err);
            }
            Err(_) => {
                tracing::warn!(target = "esgate::gate", username, ?timeout, "permission lookup timed out");
                return Err(GateError::LookupTimeout { timeout });
            }
        };

        permission.validate().map_err(|err| GateError::Storage {
            reason: format!("stored permission for {username} is incomplete: {err}"),
        })?;
        permission.compile()
    }

    /// Classify `request` and check it against `username`'s permission.
    pub async fn authorize(
        &self,
        request: &RequestParts,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Authorization> {
        let classification = self.classifier.classify_request(request);
        let permission = self.load_permission(username, cancel).await?;

        self.chain
            .enforce(&RequestScope::new(&classification, &permission))?;

        tracing::debug!(
            target = "esgate::gate",
            username,
            acl = %classification.acl(),
            op = %classification.op(),
            resources = ?classification.resources(),
            "request authorized"
        );
        Ok(Authorization {
            classification,
            permission,
        })
    }
}
