//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::NodeError;

/// Configuration for a VeriPort node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The registry directory and the
/// carrier routing table are plain TOML tables:
///
/// ```toml
/// listen_addr = "0.0.0.0:7410"
/// default_registry = "registry-global"
///
/// [registries]
/// registry-global = "https://registry.example.net"
/// registry-uae = "https://uae.registry.example.net"
///
/// [routing]
/// airline-emirates = "registry-uae"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address the RPC server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Registry consulted for carriers with no explicit route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_registry: Option<String>,

    /// Shard count for the in-memory trust cache.
    #[serde(default = "default_cache_shards")]
    pub cache_shards: usize,

    /// Seconds between expiry sweeps of the trust cache.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Per-call timeout for registry round-trips, in seconds.
    #[serde(default = "default_registry_timeout_secs")]
    pub registry_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registry directory: registry id to base URL.
    #[serde(default)]
    pub registries: BTreeMap<String, String>,

    /// Carrier routing: carrier id to registry id.
    #[serde(default)]
    pub routing: BTreeMap<String, String>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> String {
    "127.0.0.1:7410".to_string()
}

fn default_cache_shards() -> usize {
    64
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_registry_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            default_registry: None,
            cache_shards: default_cache_shards(),
            sweep_interval_secs: default_sweep_interval_secs(),
            registry_timeout_secs: default_registry_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            registries: BTreeMap::new(),
            routing: BTreeMap::new(),
        }
    }
}
