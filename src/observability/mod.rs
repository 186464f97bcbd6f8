//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! bridge + native module produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (call / settlement counters)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
