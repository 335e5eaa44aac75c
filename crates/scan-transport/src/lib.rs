//! The transport session: one full-duplex channel, exchanged one 9-byte
//! frame at a time, chip-select held low for the entire window.
//!
//! This crate only defines the contract. The physical driver (serial bus,
//! GPIO chip-select/reset) is a collaborator outside this core; see
//! `scan-test-support` for the mock used in this workspace's tests.

use std::error::Error as StdError;

use scan_core::RawFrame;
use thiserror::Error;

/// A failure from the underlying bus driver.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[source] Box<dyn StdError + Send + Sync>),
}

impl TransportError {
    /// Wrap any driver error as an I/O failure.
    pub fn io<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Io(Box::new(source))
    }
}

/// One full-duplex channel to the device.
///
/// A single call to `exchange` must transmit and receive exactly 9 bytes
/// each way, atomically (chip-select held low for the whole window).
/// Implementors own the chip-select discipline; every code path, including
/// error paths, must release it.
pub trait Transport {
    /// Exchange one frame: send `out`, return what came back in the same
    /// window.
    ///
    /// # Errors
    /// Returns [`TransportError::Io`] on a driver failure. No partial frame
    /// is ever observed by the caller: either the whole 9 bytes went out and
    /// the whole 9 bytes came back, or this returns an error.
    fn exchange(&mut self, out: RawFrame) -> Result<RawFrame, TransportError>;
}
