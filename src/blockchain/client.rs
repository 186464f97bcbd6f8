//! JSON-RPC endpoint connection.
//!
//! # Responsibilities
//! - Resolve and validate the endpoint requested by `init`
//! - Query client version and balances
//! - Bound every request by the configured timeout

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use tokio::time::timeout;
use url::Url;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Resolve the endpoint for `url`, falling back to `default` when empty.
///
/// Only `http` and `https` URLs with a host are accepted.
pub fn resolve_endpoint(url: &str, default: &str) -> BlockchainResult<Url> {
    let raw = if url.is_empty() { default } else { url };
    let parsed = Url::parse(raw).map_err(|e| BlockchainError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(BlockchainError::InvalidUrl(raw.to_string()));
    }
    Ok(parsed)
}

/// Connection to a single JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcClient {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: Url,
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a client for `endpoint`. No request is made.
    pub fn connect(endpoint: Url, timeout_duration: Duration) -> Self {
        let provider = ProviderBuilder::new().connect_http(endpoint.clone());
        Self {
            provider: Arc::new(provider),
            endpoint,
            timeout_duration,
        }
    }

    /// Get the endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the node for its client version string.
    pub async fn client_version(&self) -> BlockchainResult<String> {
        match timeout(self.timeout_duration, self.provider.get_client_version()).await {
            Ok(Ok(version)) => Ok(version),
            Ok(Err(e)) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "web3_clientVersion failed");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(endpoint = %self.endpoint, "web3_clientVersion timed out");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    /// Get the balance of an address at the latest block, in wei.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        match timeout(self.timeout_duration, self.provider.get_balance(address)).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => {
                tracing::warn!(endpoint = %self.endpoint, %address, error = %e, "eth_getBalance failed");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(endpoint = %self.endpoint, %address, "eth_getBalance timed out");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
