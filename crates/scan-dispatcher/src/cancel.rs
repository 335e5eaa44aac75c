//! Cooperative cancellation, polled between frame exchanges.
//!
//! `start`/`stop` are single exchanges and are not cancellable; every other
//! submission checks the token before transmitting its next frame, never
//! mid-frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A clone-and-share cancel flag. Cloning shares the same underlying flag;
/// setting it from any clone is observed by all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
