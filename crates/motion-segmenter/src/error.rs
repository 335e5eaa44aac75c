use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SegmentError {
    #[error("re-originated coefficient overflows the device's 64-bit ALU width")]
    Overflow,

    #[error("segment velocity bound {bound} exceeds the Nyquist threshold {threshold} (F_MOTOR/2)")]
    Nyquist { bound: u128, threshold: u128 },
}
