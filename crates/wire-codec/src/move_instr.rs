//! MOVE instruction: tag + tick count + per-motor polynomial coefficients.

use scan_core::{CommandKind, Coef, RawFrame, Ticks};

use crate::{pack_header, unpack_header, word_of, DecodeError, EncodeError, InstructionTag};

/// One segment of a move trajectory, already bounded to fit in a single
/// instruction (see `motion-segmenter` for splitting longer moves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSegment {
    pub ticks: Ticks,
    /// `[c0, c1, c2]` per motor, in motor index order.
    pub coefficients: Vec<[Coef; 3]>,
}

/// Encode a move segment into its frame sequence: one header frame (tag +
/// ticks), then three frames per motor (`c0`, `c1`, `c2`).
pub fn encode_move(segment: &MoveSegment) -> Result<Vec<RawFrame>, EncodeError> {
    if segment.ticks.get() > crate::MAX_TICKS_FIELD {
        return Err(EncodeError::TicksOverflow(segment.ticks.get()));
    }

    let mut frames = Vec::with_capacity(1 + segment.coefficients.len() * 3);
    let header = pack_header(InstructionTag::Move, segment.ticks.get());
    frames.push(crate::encode_command(CommandKind::Write, header));

    for motor in &segment.coefficients {
        for coef in motor {
            frames.push(crate::encode_command(CommandKind::Write, *coef as u64));
        }
    }

    Ok(frames)
}

/// Decode a MOVE instruction's frames back into a [`MoveSegment`].
pub fn decode_move(frames: &[RawFrame], motors: usize) -> Result<MoveSegment, DecodeError> {
    let expected = 1 + motors * 3;
    if frames.len() != expected {
        return Err(DecodeError::FrameCountMismatch {
            expected,
            got: frames.len(),
        });
    }

    let (tag_byte, ticks) = unpack_header(word_of(frames[0]));
    if InstructionTag::try_from(tag_byte)? != InstructionTag::Move {
        return Err(DecodeError::UnknownTag(tag_byte));
    }

    let mut coefficients = Vec::with_capacity(motors);
    for motor_frames in frames[1..].chunks_exact(3) {
        let c0 = word_of(motor_frames[0]) as Coef;
        let c1 = word_of(motor_frames[1]) as Coef;
        let c2 = word_of(motor_frames[2]) as Coef;
        coefficients.push([c0, c1, c2]);
    }

    Ok(MoveSegment {
        ticks: Ticks::new(ticks),
        coefficients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> MoveSegment {
        MoveSegment {
            ticks: Ticks::new(10_000),
            coefficients: vec![[1, 0, 0], [2, -3, 4]],
        }
    }

    #[test]
    fn encode_produces_one_header_and_three_frames_per_motor() {
        let frames = encode_move(&segment()).unwrap();
        assert_eq!(frames.len(), 1 + 2 * 3);
    }

    #[test]
    fn round_trips_through_decode() {
        let original = segment();
        let frames = encode_move(&original).unwrap();
        let decoded = decode_move(&frames, 2).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn ticks_overflow_is_rejected_before_encoding() {
        let bad = MoveSegment {
            ticks: Ticks::new(crate::MAX_TICKS_FIELD + 1),
            coefficients: vec![[0, 0, 0]],
        };
        assert_eq!(
            encode_move(&bad),
            Err(EncodeError::TicksOverflow(crate::MAX_TICKS_FIELD + 1))
        );
    }

    #[test]
    fn first_nine_bytes_decode_to_write_with_tag_in_high_byte() {
        let frames = encode_move(&segment()).unwrap();
        assert_eq!(frames[0][0], u8::from(CommandKind::Write));
        assert_eq!(frames[0][1], u8::from(InstructionTag::Move));
    }
}
