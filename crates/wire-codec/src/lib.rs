//! Pure functions that pack and unpack the wire protocol: command/reply
//! frames, and the three instruction payload families (MOVE, PIN,
//! LASERLINE). No I/O happens here; see `scan-transport` for the exchange.

mod error;
mod laserline;
mod move_instr;
mod pin;
mod tag;

pub use error::{DecodeError, EncodeError};
pub use laserline::encode_laserline;
pub use move_instr::{decode_move, encode_move, MoveSegment};
pub use pin::{decode_pin, encode_pin, PinVector};
pub use tag::InstructionTag;

use scan_core::{CommandKind, RawFrame, Reply, StatusByte};

pub use scan_core::MAX_TICKS_FIELD;

/// Upper bound of the 55-bit `ticks_per_half_step` field in a laserline
/// header (the remaining bit is the direction).
pub const MAX_TICKS_PER_STEP: u64 = (1 << 55) - 1;

/// Pack a command byte and a 64-bit word into the 9 bytes transmitted on
/// the wire, most-significant byte first.
#[must_use]
pub fn encode_command(kind: CommandKind, word: u64) -> RawFrame {
    let mut bytes = [0u8; 9];
    bytes[0] = kind.into();
    bytes[1..].copy_from_slice(&word.to_be_bytes());
    bytes
}

/// Unpack a reply's 9 bytes into its status byte and word.
#[must_use]
pub fn decode_reply(bytes: RawFrame) -> (StatusByte, u64) {
    let reply = Reply::from_bytes(bytes);
    (reply.status, reply.word)
}

/// Pack an instruction tag and a 56-bit field into the header word: the
/// tag occupies the highest byte, the field the remaining 56 bits.
pub(crate) fn pack_header(tag: tag::InstructionTag, field: u64) -> u64 {
    (u64::from(u8::from(tag)) << 56) | (field & MAX_TICKS_FIELD)
}

/// Split a header word back into its tag byte and 56-bit field.
pub(crate) fn unpack_header(word: u64) -> (u8, u64) {
    ((word >> 56) as u8, word & MAX_TICKS_FIELD)
}

/// Extract the 64-bit word from a raw frame, regardless of whether its
/// leading byte is a command or a status byte.
pub(crate) fn word_of(bytes: RawFrame) -> u64 {
    let mut word_bytes = [0u8; 8];
    word_bytes.copy_from_slice(&bytes[1..]);
    u64::from_be_bytes(word_bytes)
}
