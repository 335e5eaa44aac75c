//! Encode/decode failures. These are bugs or caller misuse, not device
//! conditions — they are raised before any byte leaves the host.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("tick count {0} does not fit the 7-byte wire field (max {max})", max = crate::MAX_TICKS_FIELD)]
    TicksOverflow(u64),

    #[error("ticks-per-half-step {0} does not fit the 55-bit wire field (max {max})", max = crate::MAX_TICKS_PER_STEP)]
    TicksPerStepOverflow(u64),

    #[error("laserline payload carried {got} data words, expected {expected}")]
    WordCountMismatch { expected: usize, got: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognised instruction tag {0:#04x}")]
    UnknownTag(u8),

    #[error("expected {expected} frames for this instruction, got {got}")]
    FrameCountMismatch { expected: usize, got: usize },
}
