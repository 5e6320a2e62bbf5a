/*!
Pelco-D frame encoding and decoding.

A frame is always seven bytes:

| Offset | Field      |
|--------|------------|
| 0      | sync (0xFF)|
| 1      | address    |
| 2      | command-1  |
| 3      | command-2  |
| 4      | value high |
| 5      | value low  |
| 6      | checksum   |

The checksum is the sum of bytes 1 to 5 modulo 256.
*/

use crate::command::Command;
use crate::error::{ProtocolError, Result};
use crate::protocol::{DEFAULT_ADDRESS, FRAME_LENGTH, SYNC_BYTE};
use serde::{Deserialize, Serialize};

const ADDRESS_INDEX: usize = 1;
const COMMAND1_INDEX: usize = 2;
const COMMAND2_INDEX: usize = 3;
const VALUE_HIGH_INDEX: usize = 4;
const VALUE_LOW_INDEX: usize = 5;
const CHECKSUM_INDEX: usize = 6;

/// A single Pelco-D frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub sync: u8,
    pub address: u8,
    pub command1: u8,
    pub command2: u8,
    pub value: u16,
    pub checksum: u8,
}

impl Frame {
    /// Build a request frame for the default device address
    pub fn new(opcode: u8, value: u16) -> Self {
        Self::with_address(DEFAULT_ADDRESS, opcode, value)
    }

    /// Build a request frame for a specific device address
    pub fn with_address(address: u8, opcode: u8, value: u16) -> Self {
        let mut frame = Self {
            sync: SYNC_BYTE,
            address,
            command1: 0x00,
            command2: opcode,
            value,
            checksum: 0,
        };
        frame.checksum = frame.compute_checksum();
        frame
    }

    /// Build the request frame for a catalog command
    pub fn request(command: Command, value: u16) -> Self {
        Self::new(command.opcode(), value)
    }

    /// Parse a frame from received bytes.
    ///
    /// Only the length is checked; every field is kept as received.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; FRAME_LENGTH] = bytes
            .try_into()
            .map_err(|_| ProtocolError::malformed(bytes.len()))?;

        Ok(Self {
            sync: bytes[0],
            address: bytes[ADDRESS_INDEX],
            command1: bytes[COMMAND1_INDEX],
            command2: bytes[COMMAND2_INDEX],
            value: u16::from_be_bytes([bytes[VALUE_HIGH_INDEX], bytes[VALUE_LOW_INDEX]]),
            checksum: bytes[CHECKSUM_INDEX],
        })
    }

    /// Serialize the frame to its wire representation
    pub fn to_bytes(&self) -> [u8; FRAME_LENGTH] {
        let [high, low] = self.value.to_be_bytes();
        [
            self.sync,
            self.address,
            self.command1,
            self.command2,
            high,
            low,
            self.checksum,
        ]
    }

    /// Checksum the fields of this frame should carry
    pub fn compute_checksum(&self) -> u8 {
        checksum(&self.to_bytes())
    }

    /// Check the stored checksum against the frame fields
    pub fn has_valid_checksum(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Check a reply frame against the request it answers
    pub fn verify_reply(&self, expected_address: u8, expected_opcode: u8) -> Result<()> {
        if self.sync != SYNC_BYTE {
            return Err(ProtocolError::UnexpectedSync(self.sync));
        }

        if self.address != expected_address {
            return Err(ProtocolError::UnexpectedAddress {
                expected: expected_address,
                actual: self.address,
            });
        }

        let expected = self.compute_checksum();
        if self.checksum != expected {
            return Err(ProtocolError::ChecksumMismatch {
                expected,
                actual: self.checksum,
            });
        }

        if self.command2 != expected_opcode {
            return Err(ProtocolError::UnexpectedOpcode {
                expected: expected_opcode,
                actual: self.command2,
            });
        }

        Ok(())
    }
}

/// How much of a reply frame is checked before its value is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyValidation {
    /// Any seven-byte reply is accepted and only its value field is read
    #[default]
    Lenient,
    /// Sync, address, checksum and response opcode must all match
    Strict,
}

impl ReplyValidation {
    /// Apply this policy to a reply received for `command`
    pub fn check(self, reply: &Frame, request: &Frame, command: Command) -> Result<()> {
        match self {
            Self::Lenient => Ok(()),
            Self::Strict => reply.verify_reply(request.address, command.response_opcode()),
        }
    }
}

/// Sum of the address, command and value bytes modulo 256
pub fn checksum(bytes: &[u8; FRAME_LENGTH]) -> u8 {
    bytes[ADDRESS_INDEX..CHECKSUM_INDEX]
        .iter()
        .fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

/// Encode an opcode and value into wire bytes
pub fn encode(opcode: u8, value: u16) -> [u8; FRAME_LENGTH] {
    Frame::new(opcode, value).to_bytes()
}

/// Extract the value field from a received frame
pub fn decode(bytes: &[u8]) -> Result<u16> {
    Frame::from_bytes(bytes).map(|frame| frame.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_pan_steps_frame() {
        assert_eq!(
            encode(Command::GetPanSteps.opcode(), 0),
            [0xFF, 0x01, 0x00, 0x51, 0x00, 0x00, 0x52]
        );
    }

    #[test]
    fn test_set_tilt_steps_frame() {
        assert_eq!(
            Frame::request(Command::SetTiltSteps, 0x0100).to_bytes(),
            [0xFF, 0x01, 0x00, 0x73, 0x01, 0x00, 0x75]
        );
    }

    #[test]
    fn test_checksum_wraps() {
        // 0x01 + 0x9B + 0xFF + 0xFF = 0x29A
        let bytes = encode(Command::GetVoltage.opcode(), 0xFFFF);
        assert_eq!(bytes[6], 0x9A);
    }

    #[test]
    fn test_checksum_invariant() {
        for command in Command::ALL {
            for value in [0u16, 1, 0x00FF, 0x0100, 0x1234, 0x7FFF, 0x8000, 0xFFFF] {
                let b = encode(command.opcode(), value);
                let sum = b[1] as u32 + b[2] as u32 + b[3] as u32 + b[4] as u32 + b[5] as u32;
                assert_eq!(b[6] as u32, sum % 256, "{} {:#06x}", command, value);
            }
        }
    }

    #[test]
    fn test_value_survives_decode() {
        for value in [0u16, 0x0001, 0x00FF, 0x0100, 0xABCD, 0xFFFF] {
            let bytes = encode(0x51, value);
            assert_eq!(decode(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_ignores_checksum_and_opcode() {
        let bytes = [0x00, 0x09, 0x00, 0x42, 0x04, 0xCE, 0x00];
        assert_eq!(decode(&bytes).unwrap(), 1230);
    }

    #[test]
    fn test_decode_short_frame() {
        let err = decode(&[0xFF, 0x01, 0x00, 0x61, 0x00]).unwrap_err();
        assert_eq!(err, ProtocolError::MalformedFrame { expected: 7, actual: 5 });
    }

    #[test]
    fn test_decode_long_frame() {
        let err = decode(&[0u8; 8]).unwrap_err();
        assert_eq!(err, ProtocolError::MalformedFrame { expected: 7, actual: 8 });
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_from_bytes_keeps_received_checksum() {
        let frame = Frame::from_bytes(&[0xFF, 0x01, 0x00, 0x61, 0x00, 0x10, 0x00]).unwrap();
        assert_eq!(frame.checksum, 0x00);
        assert!(!frame.has_valid_checksum());
        assert_eq!(frame.compute_checksum(), 0x72);
    }

    #[test]
    fn test_with_address() {
        let frame = Frame::with_address(0x02, 0x55, 0);
        assert_eq!(frame.to_bytes(), [0xFF, 0x02, 0x00, 0x55, 0x00, 0x00, 0x57]);
        assert!(frame.has_valid_checksum());
    }

    #[test]
    fn test_strict_validation() {
        let request = Frame::request(Command::GetPanSteps, 0);
        let good = Frame::new(0x61, 500);
        assert!(ReplyValidation::Strict
            .check(&good, &request, Command::GetPanSteps)
            .is_ok());

        let wrong_opcode = Frame::new(0x63, 500);
        assert_eq!(
            ReplyValidation::Strict.check(&wrong_opcode, &request, Command::GetPanSteps),
            Err(ProtocolError::UnexpectedOpcode { expected: 0x61, actual: 0x63 })
        );

        let mut bad_sum = good;
        bad_sum.checksum = bad_sum.checksum.wrapping_add(1);
        assert!(matches!(
            ReplyValidation::Strict.check(&bad_sum, &request, Command::GetPanSteps),
            Err(ProtocolError::ChecksumMismatch { .. })
        ));

        let mut bad_sync = good;
        bad_sync.sync = 0xFE;
        assert_eq!(
            bad_sync.verify_reply(0x01, 0x61),
            Err(ProtocolError::UnexpectedSync(0xFE))
        );

        let other_device = Frame::with_address(0x05, 0x61, 500);
        assert!(matches!(
            other_device.verify_reply(0x01, 0x61),
            Err(ProtocolError::UnexpectedAddress { expected: 0x01, actual: 0x05 })
        ));
    }

    #[test]
    fn test_lenient_validation_accepts_anything() {
        let request = Frame::request(Command::GetVoltage, 0);
        let garbage = Frame::from_bytes(&[0u8; 7]).unwrap();
        assert!(ReplyValidation::Lenient
            .check(&garbage, &request, Command::GetVoltage)
            .is_ok());
        assert_eq!(ReplyValidation::default(), ReplyValidation::Lenient);
    }
}
