use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScanError {
    #[error("laserline payload has {got} bits, more than bits_per_line ({bits_per_line})")]
    OverLong { bits_per_line: u32, got: usize },

    #[error("facet sync not observed within stable_s ({stable_s}s)")]
    SyncTimeout { stable_s: f64 },

    #[error("device asserted dispatch_error mid-scanline; FIFO drained")]
    FifoDrained,

    #[error(transparent)]
    Encode(#[from] wire_codec::EncodeError),
}
