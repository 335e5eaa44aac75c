//! Command byte encoding.

use thiserror::Error;

/// The five command kinds the device parser recognises. Numeric values are
/// stable across the codebase; every other byte value is reserved and the
/// device sets `parse_error` on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandKind {
    Position = 0x00,
    Read = 0x01,
    Start = 0x02,
    Stop = 0x03,
    Write = 0x04,
}

/// A command byte outside the five assigned values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("reserved command byte {0:#04x}")]
pub struct CommandError(pub u8);

impl From<CommandKind> for u8 {
    fn from(kind: CommandKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for CommandKind {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Position),
            0x01 => Ok(Self::Read),
            0x02 => Ok(Self::Start),
            0x03 => Ok(Self::Stop),
            0x04 => Ok(Self::Write),
            other => Err(CommandError(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_assigned_value() {
        for kind in [
            CommandKind::Position,
            CommandKind::Read,
            CommandKind::Start,
            CommandKind::Stop,
            CommandKind::Write,
        ] {
            let byte: u8 = kind.into();
            assert_eq!(CommandKind::try_from(byte), Ok(kind));
        }
    }

    #[test]
    fn reserved_byte_is_rejected() {
        assert_eq!(CommandKind::try_from(0x05), Err(CommandError(0x05)));
    }
}
