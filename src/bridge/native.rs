//! Native capability boundary.

use crate::bridge::callback::Callback;

/// Callback-style wallet and RPC capability the client forwards to.
///
/// Every operation receives a trailing [`Callback`] and must settle it once
/// the work is done. Implementations own all validation, conversion and
/// error policy; the values they settle with pass through untouched.
pub trait NativeModule: Send + Sync {
    /// Error value handed back on failure.
    type Error: Send + 'static;
    /// Payload produced by a successful `init`.
    type ClientVersion: Send + 'static;
    /// Descriptor of a single wallet.
    type Wallet: Send + 'static;
    /// Balance payload.
    type Balance: Send + 'static;

    /// Establish or replace the connection context for `url`.
    fn init(&self, url: String, callback: Callback<Self::ClientVersion, Self::Error>);

    /// Enumerate locally known wallets.
    fn list_wallets(&self, callback: Callback<Vec<Self::Wallet>, Self::Error>);

    /// Create a new wallet protected by `password`.
    fn create_wallet(&self, password: String, callback: Callback<Self::Wallet, Self::Error>);

    /// Query the balance of `address` denominated in `unit`.
    fn get_balance(
        &self,
        address: String,
        unit: String,
        callback: Callback<Self::Balance, Self::Error>,
    );
}

impl<M: NativeModule + ?Sized> NativeModule for std::sync::Arc<M> {
    type Error = M::Error;
    type ClientVersion = M::ClientVersion;
    type Wallet = M::Wallet;
    type Balance = M::Balance;

    fn init(&self, url: String, callback: Callback<Self::ClientVersion, Self::Error>) {
        (**self).init(url, callback)
    }

    fn list_wallets(&self, callback: Callback<Vec<Self::Wallet>, Self::Error>) {
        (**self).list_wallets(callback)
    }

    fn create_wallet(&self, password: String, callback: Callback<Self::Wallet, Self::Error>) {
        (**self).create_wallet(password, callback)
    }

    fn get_balance(
        &self,
        address: String,
        unit: String,
        callback: Callback<Self::Balance, Self::Error>,
    ) {
        (**self).get_balance(address, unit, callback)
    }
}
