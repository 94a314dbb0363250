//! Cooperative cancellation for in-flight remote calls.
//!
//! A token is threaded through both the move and the session-start ports so
//! tests can simulate cancellation deterministically without real clocks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle for cooperative cancellation of a remote call.
///
/// Clone is cheap and shares state: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
