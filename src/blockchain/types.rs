//! Native-side value types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::units::Unit;

/// Errors reported through native callbacks.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Endpoint URL is malformed or uses an unsupported scheme.
    #[error("Invalid client URL: {0}")]
    InvalidUrl(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// A balance query arrived before any successful `init`.
    #[error("Client not initialized: call init first")]
    NotInitialized,

    /// Address is not a valid 20-byte hex address.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Unit name is not a known denomination.
    #[error("Invalid conversion unit. Please use one of the following: {}", Unit::names())]
    InvalidUnit(String),

    /// Key generation or keystore encryption failed.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// A keystore file could not be interpreted.
    #[error("Error parsing file {path}: {reason}")]
    Keystore { path: String, reason: String },

    /// No async runtime to run native work on.
    #[error("Runtime unavailable: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for native operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Identifies a wallet stored in the keystore directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDescriptor {
    /// `0x`-prefixed hex address.
    pub address: String,
    /// Abbreviated address for display, e.g. `0xf39fd...92266`.
    pub short_address: String,
    /// Absolute path of the keystore file.
    pub file_path: String,
}

/// Balance of an address in a chosen denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Exact decimal amount.
    pub amount: String,
    /// Unit name as requested by the caller.
    pub unit: String,
}
