//! Promise-style client facade over a [`NativeModule`].
//!
//! # Responsibilities
//! - Forward each call positionally and unmodified to the native module
//! - Fill in the two defaults: empty endpoint for `init_client`, `"wei"` for `get_balance`
//! - Return the outcome as an awaitable [`Settlement`]
//!
//! # Design Decisions
//! - Stateless: every call is independent and may settle in any order
//! - No validation, normalization or retry; errors are `M::Error` verbatim

use crate::bridge::callback::{adapt, Settlement};
use crate::bridge::native::NativeModule;

/// Endpoint forwarded by [`Web3Client::init_client`] when none is given.
pub const DEFAULT_URL: &str = "";

/// Unit forwarded by [`Web3Client::get_balance`] when none is given.
pub const DEFAULT_UNIT: &str = "wei";

/// Client facade.
///
/// Constructed explicitly by the caller around a native module; there is no
/// shared global instance.
#[derive(Debug, Clone)]
pub struct Web3Client<M> {
    module: M,
}

impl<M: NativeModule> Web3Client<M> {
    /// Wrap a native module.
    pub fn new(module: M) -> Self {
        Self { module }
    }

    /// Get the underlying native module.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// Connect to `url`, or the module's default endpoint when `None`.
    pub fn init_client(&self, url: Option<&str>) -> Settlement<M::ClientVersion, M::Error> {
        let url = url.unwrap_or(DEFAULT_URL).to_owned();
        tracing::debug!(url = %url, "initClient");
        adapt("init", |cb| self.module.init(url, cb))
    }

    /// List locally known wallets.
    pub fn list_wallets(&self) -> Settlement<Vec<M::Wallet>, M::Error> {
        tracing::debug!("listWallets");
        adapt("list_wallets", |cb| self.module.list_wallets(cb))
    }

    /// Create a new wallet protected by `password`.
    pub fn create_wallet(&self, password: &str) -> Settlement<M::Wallet, M::Error> {
        tracing::debug!("createWallet");
        adapt("create_wallet", |cb| self.module.create_wallet(password.to_owned(), cb))
    }

    /// Query the balance of `address` in `unit` (`"wei"` when `None`).
    pub fn get_balance(&self, address: &str, unit: Option<&str>) -> Settlement<M::Balance, M::Error> {
        let unit = unit.unwrap_or(DEFAULT_UNIT).to_owned();
        tracing::debug!(address = %address, unit = %unit, "getBalance");
        adapt("get_balance", |cb| self.module.get_balance(address.to_owned(), unit, cb))
    }
}
