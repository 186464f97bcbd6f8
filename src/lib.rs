//! Promise-style client over a callback-driven wallet and blockchain module.

pub mod blockchain;
pub mod bridge;
pub mod config;
pub mod observability;

pub use blockchain::AlloyModule;
pub use bridge::{adapt, Callback, NativeModule, Settlement, Web3Client};
pub use config::BridgeConfig;
