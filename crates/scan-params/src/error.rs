//! Parameter validation failures. All of these are raised once, at
//! construction; a built [`crate::Parameters`] is guaranteed consistent for
//! the rest of the session.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParamsError {
    #[error("rpm must be positive, got {0}")]
    InvalidRpm(f64),

    #[error("facets must be at least 1")]
    InvalidFacets,

    #[error("fractions must satisfy 0 < start_frac < end_frac < 1, got start={start} end={end}")]
    InvalidFractions { start: f64, end: f64 },

    #[error("motors must be at least 1")]
    InvalidMotors,

    #[error("bits_per_line must be at least 1")]
    InvalidBitsPerLine,

    #[error("ticks_move {0} does not fit the 7-byte wire field")]
    TicksMoveOverflow(u64),

    #[error(
        "scan window of {window_ticks} ticks does not divide evenly by {bits_per_line} bits per line"
    )]
    WindowUnaligned { window_ticks: u64, bits_per_line: u32 },
}
