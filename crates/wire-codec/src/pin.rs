//! PIN instruction: tag + a one-byte pin vector, zero-padded to 7 bytes.

use scan_core::{CommandKind, RawFrame};

use crate::{pack_header, unpack_header, word_of, DecodeError, InstructionTag};

/// Polygon-motor enable, laser-0, and laser-1 bits, in that fixed order.
pub const POLYGON_MOTOR: u8 = 0b0000_0001;
pub const LASER_0: u8 = 0b0000_0010;
pub const LASER_1: u8 = 0b0000_0100;

/// The pin vector sent in a PIN instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinVector(u8);

impl PinVector {
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn polygon_motor(self) -> bool {
        self.0 & POLYGON_MOTOR != 0
    }

    #[must_use]
    pub const fn laser0(self) -> bool {
        self.0 & LASER_0 != 0
    }

    #[must_use]
    pub const fn laser1(self) -> bool {
        self.0 & LASER_1 != 0
    }

    #[must_use]
    pub const fn with_polygon_motor(self, on: bool) -> Self {
        self.set(POLYGON_MOTOR, on)
    }

    #[must_use]
    pub const fn with_laser0(self, on: bool) -> Self {
        self.set(LASER_0, on)
    }

    #[must_use]
    pub const fn with_laser1(self, on: bool) -> Self {
        self.set(LASER_1, on)
    }

    const fn set(self, bit: u8, on: bool) -> Self {
        if on { Self(self.0 | bit) } else { Self(self.0 & !bit) }
    }
}

/// Encode a PIN instruction: a single frame, tag in the header's high byte,
/// the vector in the low byte of the remaining 56-bit field.
#[must_use]
pub fn encode_pin(vector: PinVector) -> Vec<RawFrame> {
    let header = pack_header(InstructionTag::Pin, u64::from(vector.get()));
    vec![crate::encode_command(CommandKind::Write, header)]
}

/// Decode a PIN instruction's single frame back into a [`PinVector`].
pub fn decode_pin(frames: &[RawFrame]) -> Result<PinVector, DecodeError> {
    if frames.len() != 1 {
        return Err(DecodeError::FrameCountMismatch {
            expected: 1,
            got: frames.len(),
        });
    }

    let (tag_byte, field) = unpack_header(word_of(frames[0]));
    if InstructionTag::try_from(tag_byte)? != InstructionTag::Pin {
        return Err(DecodeError::UnknownTag(tag_byte));
    }

    Ok(PinVector::new(field as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let vector = PinVector::new(0).with_polygon_motor(true).with_laser1(true);
        let frames = encode_pin(vector);
        assert_eq!(frames.len(), 1);
        assert_eq!(decode_pin(&frames).unwrap(), vector);
    }

    #[test]
    fn fixed_bit_order() {
        let vector = PinVector::new(0)
            .with_polygon_motor(true)
            .with_laser0(true)
            .with_laser1(true);
        assert_eq!(vector.get(), 0b0000_0111);
    }
}
