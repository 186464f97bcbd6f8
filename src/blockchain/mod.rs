//! Blockchain-backed native module.
//!
//! # Data Flow
//! ```text
//! NativeModule call
//!     → module.rs (AlloyModule: dispatch onto the runtime)
//!     → client.rs (JSON-RPC with timeouts) + units.rs (wei conversion)
//!     → keystore.rs (encrypted wallet files)
//! ```
//!
//! # Security Constraints
//! - Never log passwords or key material
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod keystore;
pub mod module;
pub mod types;
pub mod units;

pub use client::RpcClient;
pub use keystore::Keystore;
pub use module::AlloyModule;
pub use types::{Balance, BlockchainError, BlockchainResult, WalletDescriptor};
pub use units::Unit;
