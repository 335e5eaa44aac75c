//! Shared wire-level types and introspection traits used across the
//! scanner controller core.
//!
//! Every exchange with the device is one [`RawFrame`] out and one in. The
//! higher crates (`wire-codec`, `scan-transport`, `scan-dispatcher`, ...)
//! build on the types here rather than re-deriving the wire shape.

mod command;
mod direction;
mod observable;
mod status;
mod ticks;

pub use command::{CommandError, CommandKind};
pub use direction::Direction;
pub use observable::{Observable, Value};
pub use status::StatusByte;
pub use ticks::Ticks;

/// Width in bytes of one direction of a frame exchange: one command/status
/// byte plus one 64-bit word.
pub const FRAME_LEN: usize = 9;

/// Signed fixed-point coefficient, interpreted by the device's ALU at
/// `F_MOTOR`. See `motion-segmenter` for re-origination and Nyquist checks.
pub type Coef = i64;

/// Upper bound of the 7-byte (56-bit) field carried in an instruction
/// header word, alongside its tag byte: used for both `ticks_move` and
/// per-segment tick counts.
pub const MAX_TICKS_FIELD: u64 = (1 << 56) - 1;

/// The raw 9 bytes transmitted (or received) in one direction of an
/// exchange: one command/status byte, then the 64-bit word, most
/// significant byte first.
pub type RawFrame = [u8; FRAME_LEN];

/// A host-to-device frame before serialization: a command kind and its
/// 64-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub command: CommandKind,
    pub word: u64,
}

impl Frame {
    #[must_use]
    pub const fn new(command: CommandKind, word: u64) -> Self {
        Self { command, word }
    }

    /// Pack into the 9 bytes transmitted on the wire, most-significant byte
    /// first for both the command byte's position and the word.
    #[must_use]
    pub fn to_bytes(self) -> RawFrame {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = self.command.into();
        bytes[1..].copy_from_slice(&self.word.to_be_bytes());
        bytes
    }
}

/// A device-to-host reply: the status byte and its word (meaningful only
/// for read-style commands).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusByte,
    pub word: u64,
}

impl Reply {
    #[must_use]
    pub fn from_bytes(bytes: RawFrame) -> Self {
        let mut word_bytes = [0u8; 8];
        word_bytes.copy_from_slice(&bytes[1..]);
        Self {
            status: StatusByte::new(bytes[0]),
            word: u64::from_be_bytes(word_bytes),
        }
    }
}
