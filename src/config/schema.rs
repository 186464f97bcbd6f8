//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Native module settings (RPC endpoint, keystore).
    pub native: NativeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings for the alloy-backed native module.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Directory holding keystore files.
    pub data_dir: PathBuf,

    /// Endpoint used when `init` receives an empty URL.
    pub default_rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("wallets"),
            default_rpc_url: "http://localhost:8545".to_string(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
