use std::fmt;

use scan_core::StatusByte;
use thiserror::Error;

/// Which error flag the device raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    Parse,
    Dispatch,
}

impl fmt::Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectKind::Parse => write!(f, "parse_error"),
            RejectKind::Dispatch => write!(f, "dispatch_error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatcherError {
    #[error("device rejected the instruction ({kind}), status {status:?}")]
    DeviceRejected { kind: RejectKind, status: StatusByte },

    #[error("memory-full backoff exhausted after {attempts} attempts")]
    BackpressureExhausted { attempts: u32 },

    #[error("submission cancelled between frames")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] scan_transport::TransportError),

    #[error(transparent)]
    Encode(#[from] wire_codec::EncodeError),

    #[error(transparent)]
    Segment(#[from] motion_segmenter::SegmentError),

    #[error(transparent)]
    Scan(#[from] scanline_engine::ScanError),
}
