//! Gate configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOOKUP_TIMEOUT_MS, DEFAULT_PERMISSION_INDEX, DEFAULT_STREAM_PARAM};
use crate::storage::StorageVersion;
use crate::{GateError, Result};

fn default_permission_index() -> String {
    DEFAULT_PERMISSION_INDEX.to_string()
}

fn default_lookup_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_MS
}

fn default_stream_param() -> String {
    DEFAULT_STREAM_PARAM.to_string()
}

/// Settings the gate is started with. Every field has a default, so a partial
/// JSON document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Selects the storage layout once at startup.
    #[serde(default)]
    pub storage_version: StorageVersion,
    #[serde(default = "default_permission_index")]
    pub permission_index: String,
    /// Longest a request may wait on a permission lookup.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// Query parameter that switches a request to the streaming ACL.
    #[serde(default = "default_stream_param")]
    pub stream_param: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            storage_version: StorageVersion::default(),
            permission_index: default_permission_index(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            stream_param: default_stream_param(),
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn builder() -> GateConfigBuilder {
        GateConfigBuilder::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| GateError::Config {
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookup_timeout_ms == 0 {
            return Err(GateError::Config {
                reason: "lookup_timeout_ms must be non-zero".into(),
            });
        }
        if self.permission_index.trim().is_empty() {
            return Err(GateError::Config {
                reason: "permission_index must not be empty".into(),
            });
        }
        if self.stream_param.trim().is_empty() {
            return Err(GateError::Config {
                reason: "stream_param must not be empty".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GateConfigBuilder {
    inner: GateConfig,
}

impl GateConfigBuilder {
    #[must_use]
    pub fn storage_version(mut self, version: StorageVersion) -> Self {
        self.inner.storage_version = version;
        self
    }

    #[must_use]
    pub fn permission_index(mut self, index: impl Into<String>) -> Self {
        self.inner.permission_index = index.into();
        self
    }

    #[must_use]
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.inner.lookup_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn stream_param(mut self, param: impl Into<String>) -> Self {
        self.inner.stream_param = param.into();
        self
    }

    pub fn build(self) -> Result<GateConfig> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config = GateConfig::from_json_str(r#"{"storage_version":"v6"}"#).unwrap();
        assert_eq!(config.storage_version, StorageVersion::V6);
        assert_eq!(config.permission_index, DEFAULT_PERMISSION_INDEX);
        assert_eq!(config.lookup_timeout(), Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS));
        assert_eq!(config.stream_param, "stream");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = GateConfig::from_json_str(r#"{"lookup_timeout_ms":0}"#).unwrap_err();
        assert!(matches!(err, GateError::Config { .. }));
    }

    #[test]
    fn unknown_version_is_a_config_error() {
        assert!(GateConfig::from_json_str(r#"{"storage_version":"v5"}"#).is_err());
    }

    #[test]
    fn builder_validates() {
        assert!(GateConfig::builder().permission_index(" ").build().is_err());
        let config = GateConfig::builder()
            .lookup_timeout(Duration::from_millis(250))
            .stream_param("live")
            .build()
            .unwrap();
        assert_eq!(config.lookup_timeout_ms, 250);
        assert_eq!(config.stream_param, "live");
    }
}
