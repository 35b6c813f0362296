//! Registry configuration.
//!
//! Hosts usually build a [`RegistryConfig`] in code, but it can also be
//! loaded from a YAML or JSON file shipped with the application:
//!
//! ```yaml
//! policy: reject-duplicates
//! resolver:
//!   cache_capacity: 512
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// What happens when a name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    /// The later registration silently replaces the earlier one.
    ///
    /// Required for hot reload, where modules re-register on every reload.
    #[default]
    LastWriterWins,
    /// Registering a different value under a taken name is an error.
    ///
    /// Re-registering the identical value is still accepted.
    RejectDuplicates,
}

/// Tuning for [`StyleResolver`](crate::StyleResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of memoized resolutions; `0` disables memoization.
    pub cache_capacity: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Default number of memoized resolutions.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub policy: RegistrationPolicy,
    pub resolver: ResolverConfig,
}

/// Error loading a [`RegistryConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension for '{path}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },
}

impl RegistryConfig {
    /// Sets the registration policy, returning the config for chaining.
    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the resolver cache capacity, returning the config for chaining.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.resolver.cache_capacity = capacity;
        self
    }

    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a config file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat { path: display }),
        };

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display,
            source,
        })?;
        parse(&source)
    }
}
