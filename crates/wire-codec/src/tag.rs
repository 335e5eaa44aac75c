//! Instruction tags: the byte carried in the high byte of the first
//! `WRITE` word of an instruction.

/// Identifies which instruction a `WRITE` stream begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstructionTag {
    Move = 0x01,
    Pin = 0x02,
    Laserline = 0x03,
}

impl From<InstructionTag> for u8 {
    fn from(tag: InstructionTag) -> Self {
        tag as u8
    }
}

impl TryFrom<u8> for InstructionTag {
    type Error = crate::DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Move),
            0x02 => Ok(Self::Pin),
            0x03 => Ok(Self::Laserline),
            other => Err(crate::DecodeError::UnknownTag(other)),
        }
    }
}
