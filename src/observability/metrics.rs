//! Bridge call metrics.
//!
//! # Metrics
//! - `web3_bridge_calls_total` (counter): native calls issued, by op
//! - `web3_bridge_settlements_total` (counter): settled calls, by op and outcome
//! - `web3_bridge_duplicate_callbacks_total` (counter): ignored repeat invocations, by op
//!
//! No recorder is installed here; without one these are no-ops.

/// Record a native call being issued.
pub fn record_call(op: &'static str) {
    ::metrics::counter!("web3_bridge_calls_total", "op" => op).increment(1);
}

/// Record a call settling.
pub fn record_settlement(op: &'static str, ok: bool) {
    let outcome = if ok { "resolved" } else { "rejected" };
    ::metrics::counter!("web3_bridge_settlements_total", "op" => op, "outcome" => outcome).increment(1);
}

/// Record a callback invoked after its call already settled.
pub fn record_duplicate_callback(op: &'static str) {
    ::metrics::counter!("web3_bridge_duplicate_callbacks_total", "op" => op).increment(1);
}
