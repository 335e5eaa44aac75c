//! LASERLINE instruction: tag + direction + ticks-per-half-step + N data
//! words of laser-on bits.

use scan_core::{CommandKind, Direction, RawFrame};

use crate::{pack_header, unpack_header, word_of, DecodeError, EncodeError, InstructionTag};

const DIRECTION_BIT: u32 = 55;

/// Encode a LASERLINE instruction: one header frame (tag, direction,
/// ticks-per-half-step) followed by one frame per 64-bit data word.
///
/// `words_per_line` is the scanline engine's derived word count for the
/// current geometry; `data.len()` must match it exactly.
pub fn encode_laserline(
    direction: Direction,
    ticks_per_step: u64,
    words_per_line: usize,
    data: &[u64],
) -> Result<Vec<RawFrame>, EncodeError> {
    if data.len() != words_per_line {
        return Err(EncodeError::WordCountMismatch {
            expected: words_per_line,
            got: data.len(),
        });
    }
    if ticks_per_step > crate::MAX_TICKS_PER_STEP {
        return Err(EncodeError::TicksPerStepOverflow(ticks_per_step));
    }

    let direction_bit = u64::from(direction.bit()) << DIRECTION_BIT;
    let header = pack_header(InstructionTag::Laserline, direction_bit | ticks_per_step);

    let mut frames = Vec::with_capacity(1 + data.len());
    frames.push(crate::encode_command(CommandKind::Write, header));
    frames.extend(data.iter().map(|word| crate::encode_command(CommandKind::Write, *word)));
    Ok(frames)
}

/// Decode a LASERLINE instruction's frames back into its fields. `expected_words`
/// must match the caller's `words_per_line`, or [`DecodeError::FrameCountMismatch`]
/// is returned.
pub fn decode_laserline(
    frames: &[RawFrame],
    expected_words: usize,
) -> Result<(Direction, u64, Vec<u64>), DecodeError> {
    let expected = 1 + expected_words;
    if frames.len() != expected {
        return Err(DecodeError::FrameCountMismatch {
            expected,
            got: frames.len(),
        });
    }

    let (tag_byte, field) = unpack_header(word_of(frames[0]));
    if InstructionTag::try_from(tag_byte)? != InstructionTag::Laserline {
        return Err(DecodeError::UnknownTag(tag_byte));
    }

    let direction = Direction::from_bit(field & (1 << DIRECTION_BIT) != 0);
    let ticks_per_step = field & crate::MAX_TICKS_PER_STEP;
    let data = frames[1..].iter().map(|f| word_of(*f)).collect();

    Ok((direction, ticks_per_step, data))
}
