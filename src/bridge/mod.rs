//! Bridge between callers and a callback-style native module.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (Web3Client method)
//!     → callback.rs (adapt: fresh Callback + Settlement)
//!     → native.rs (NativeModule operation, settles the Callback)
//!     → Settlement resolves / rejects
//!     → caller awaits
//! ```

pub mod callback;
pub mod client;
pub mod native;

pub use callback::{adapt, Callback, Settlement};
pub use client::{Web3Client, DEFAULT_UNIT, DEFAULT_URL};
pub use native::NativeModule;
