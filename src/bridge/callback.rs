//! Callback-to-future adaptation.
//!
//! # Responsibilities
//! - Hand the native capability a settlement handle it may invoke from any thread
//! - Settle exactly once: the first outcome wins, later invocations are no-ops
//! - Expose the outcome as a future the caller can await
//!
//! # Design Decisions
//! - The native call is issued eagerly inside [`adapt`], before the future is polled
//! - No timeout, retry or cancellation; a callback that is dropped unsettled
//!   leaves its [`Settlement`] pending forever

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::observability::metrics;

type Slot<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

/// Settlement handle passed to a native operation.
///
/// Cloning yields handles sharing the same single settlement.
pub struct Callback<T, E> {
    op: &'static str,
    slot: Slot<T, E>,
}

impl<T, E> Callback<T, E> {
    /// Settle with an outcome.
    ///
    /// Returns `true` if this invocation settled the call, `false` if an
    /// earlier invocation already did.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        let sender = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match sender {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    tracing::debug!(op = self.op, "Settlement dropped before callback fired");
                }
                true
            }
            None => {
                tracing::debug!(op = self.op, "Ignoring repeated callback invocation");
                metrics::record_duplicate_callback(self.op);
                false
            }
        }
    }

    /// Settle successfully with `value`.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with `error`.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Whether some clone of this handle has already settled.
    pub fn is_settled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    /// Name of the operation this callback belongs to.
    pub fn op(&self) -> &'static str {
        self.op
    }
}

impl<T, E> Clone for Callback<T, E> {
    fn clone(&self) -> Self {
        Self {
            op: self.op,
            slot: self.slot.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for Callback<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("op", &self.op)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Future side of an adapted native call.
///
/// Resolves with exactly the value or error the native side settled with.
#[must_use = "a settlement does nothing unless awaited"]
pub struct Settlement<T, E> {
    op: &'static str,
    rx: oneshot::Receiver<Result<T, E>>,
    abandoned: bool,
}

impl<T, E> Settlement<T, E> {
    /// Name of the operation this settlement belongs to.
    pub fn op(&self) -> &'static str {
        self.op
    }
}

impl<T, E> Future for Settlement<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.abandoned {
            return Poll::Pending;
        }

        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => {
                tracing::debug!(op = this.op, ok = outcome.is_ok(), "Native call settled");
                metrics::record_settlement(this.op, outcome.is_ok());
                Poll::Ready(outcome)
            }
            Poll::Ready(Err(_)) => {
                // Every callback clone is gone; nothing can ever wake us again.
                tracing::warn!(op = this.op, "Callback dropped without settling; call will never complete");
                this.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> std::fmt::Debug for Settlement<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settlement")
            .field("op", &self.op)
            .field("abandoned", &self.abandoned)
            .finish()
    }
}

/// Issue a callback-style call and return its outcome as a future.
///
/// `call` runs immediately on the current thread with a fresh [`Callback`].
pub fn adapt<T, E, F>(op: &'static str, call: F) -> Settlement<T, E>
where
    F: FnOnce(Callback<T, E>),
{
    let (tx, rx) = oneshot::channel();
    let callback = Callback {
        op,
        slot: Arc::new(Mutex::new(Some(tx))),
    };

    metrics::record_call(op);
    call(callback);

    Settlement {
        op,
        rx,
        abandoned: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolves_with_value() {
        let settlement = adapt::<_, String, _>("test", |cb| {
            assert!(cb.resolve(42u32));
        });
        assert_eq!(settlement.await, Ok(42));
    }

    #[tokio::test]
    async fn test_rejects_with_error() {
        let settlement = adapt::<u32, _, _>("test", |cb| {
            cb.reject("boom".to_string());
        });
        assert_eq!(settlement.await, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_first_settlement_wins() {
        let mut held = None;
        let settlement = adapt::<&str, &str, _>("test", |cb| held = Some(cb));
        let cb = held.unwrap();
        let other = cb.clone();

        assert!(!cb.is_settled());
        assert!(cb.resolve("first"));
        assert!(cb.is_settled());
        assert!(!other.reject("second"));
        assert!(!cb.resolve("third"));

        assert_eq!(settlement.await, Ok("first"));
    }

    #[tokio::test]
    async fn test_call_is_issued_eagerly() {
        let mut issued = false;
        let settlement = adapt::<(), (), _>("test", |cb| {
            issued = true;
            cb.resolve(());
        });
        assert!(issued);
        assert_eq!(settlement.await, Ok(()));
    }

    #[tokio::test]
    async fn test_settles_from_another_thread() {
        let settlement = adapt::<String, String, _>("test", |cb| {
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                cb.resolve("from thread".to_string());
            });
        });
        assert_eq!(settlement.await.unwrap(), "from thread");
    }

    #[tokio::test]
    async fn test_dropped_callback_never_settles() {
        let settlement = adapt::<u32, u32, _>("test", drop);
        let result = tokio::time::timeout(Duration::from_millis(50), settlement).await;
        assert!(result.is_err(), "settlement must stay pending");
    }

    #[tokio::test]
    async fn test_pending_until_invoked() {
        let mut held = None;
        let mut settlement = adapt::<u32, u32, _>("test", |cb| held = Some(cb));

        let early = tokio::time::timeout(Duration::from_millis(20), &mut settlement).await;
        assert!(early.is_err());

        held.unwrap().resolve(7);
        assert_eq!(settlement.await, Ok(7));
    }

    #[test]
    fn test_settle_after_settlement_dropped() {
        let mut held = None;
        let settlement = adapt::<u32, u32, _>("test", |cb| held = Some(cb));
        drop(settlement);

        let cb = held.unwrap();
        assert!(cb.resolve(1));
        assert!(!cb.resolve(2));
    }
}
