//! Alloy-backed native module.
//!
//! # Data Flow
//! ```text
//! NativeModule call (any thread)
//!     → spawned onto the tokio runtime
//!     → client.rs (RPC) or keystore.rs (blocking pool)
//!     → Callback settled from the worker task
//! ```

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use arc_swap::ArcSwapOption;
use tokio::runtime::Handle;

use crate::blockchain::client::{resolve_endpoint, RpcClient};
use crate::blockchain::keystore::Keystore;
use crate::blockchain::types::{Balance, BlockchainError, BlockchainResult, WalletDescriptor};
use crate::blockchain::units::{from_wei, Unit};
use crate::bridge::{Callback, NativeModule};
use crate::config::NativeConfig;

/// Native module talking to an Ethereum node through alloy and storing
/// wallets in a keystore directory.
#[derive(Clone)]
pub struct AlloyModule {
    inner: Arc<Inner>,
    runtime: Handle,
}

struct Inner {
    config: NativeConfig,
    keystore: Keystore,
    /// Installed by `init`; replaced on every valid `init`.
    client: ArcSwapOption<RpcClient>,
}

impl AlloyModule {
    /// Create a module bound to the current tokio runtime.
    pub fn new(config: NativeConfig) -> BlockchainResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| BlockchainError::Runtime(e.to_string()))?;
        Self::with_runtime(config, runtime)
    }

    /// Create a module that runs its work on `runtime`.
    pub fn with_runtime(config: NativeConfig, runtime: Handle) -> BlockchainResult<Self> {
        let keystore = Keystore::open(&config.data_dir)?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            default_rpc_url = %config.default_rpc_url,
            "Native module ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                keystore,
                client: ArcSwapOption::empty(),
            }),
            runtime,
        })
    }

    /// Get the keystore backing wallet operations.
    pub fn keystore(&self) -> &Keystore {
        &self.inner.keystore
    }

    /// Get the currently installed RPC client, if `init` has run.
    pub fn client(&self) -> Option<Arc<RpcClient>> {
        self.inner.client.load_full()
    }

    fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.inner.config.rpc_timeout_secs)
    }
}

impl Inner {
    async fn init(&self, url: String, timeout_duration: Duration) -> BlockchainResult<String> {
        let endpoint = resolve_endpoint(&url, &self.config.default_rpc_url)?;
        let client = Arc::new(RpcClient::connect(endpoint, timeout_duration));
        self.client.store(Some(client.clone()));

        let version = client.client_version().await?;
        tracing::info!(endpoint = %client.endpoint(), version = %version, "Connected to node");
        Ok(version)
    }

    async fn get_balance(&self, address: &str, unit_name: &str) -> BlockchainResult<Balance> {
        let client = self.client.load_full().ok_or(BlockchainError::NotInitialized)?;
        let unit = Unit::from_str(unit_name)?;
        let address = Address::from_str(address).map_err(|e| BlockchainError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        let wei = client.get_balance(address).await?;
        Ok(Balance {
            amount: from_wei(wei, unit),
            unit: unit_name.to_string(),
        })
    }
}

impl NativeModule for AlloyModule {
    type Error = BlockchainError;
    type ClientVersion = String;
    type Wallet = WalletDescriptor;
    type Balance = Balance;

    fn init(&self, url: String, callback: Callback<String, BlockchainError>) {
        let inner = self.inner.clone();
        let timeout_duration = self.timeout_duration();
        self.runtime.spawn(async move {
            callback.settle(inner.init(url, timeout_duration).await);
        });
    }

    fn list_wallets(&self, callback: Callback<Vec<WalletDescriptor>, BlockchainError>) {
        let keystore = self.inner.keystore.clone();
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let outcome = runtime
                .spawn_blocking(move || keystore.list())
                .await
                .unwrap_or_else(|e| Err(BlockchainError::Wallet(format!("keystore task failed: {}", e))));
            callback.settle(outcome);
        });
    }

    fn create_wallet(&self, password: String, callback: Callback<WalletDescriptor, BlockchainError>) {
        let keystore = self.inner.keystore.clone();
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let outcome = runtime
                .spawn_blocking(move || keystore.create(&password))
                .await
                .unwrap_or_else(|e| Err(BlockchainError::Wallet(format!("keystore task failed: {}", e))));
            if let Err(e) = &outcome {
                tracing::error!(error = %e, "Wallet creation failed");
            }
            callback.settle(outcome);
        });
    }

    fn get_balance(&self, address: String, unit: String, callback: Callback<Balance, BlockchainError>) {
        let inner = self.inner.clone();
        self.runtime.spawn(async move {
            let outcome = inner.get_balance(&address, &unit).await;
            if let Err(e) = &outcome {
                tracing::error!(address = %address, unit = %unit, error = %e, "Balance query failed");
            }
            callback.settle(outcome);
        });
    }
}

impl std::fmt::Debug for AlloyModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyModule")
            .field("data_dir", &self.inner.config.data_dir)
            .field("client", &self.client())
            .finish()
    }
}
