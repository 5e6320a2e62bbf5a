/*!
Error types for Pelco-D frame encoding and decoding.
*/

use thiserror::Error;

/// Common result type used throughout the protocol crate
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while parsing or validating a received frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Received byte sequence is not exactly one frame long
    #[error("Malformed frame: expected {expected} bytes, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    /// Checksum byte does not match the sum of the frame fields
    #[error("Checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// First byte is not the synchronization byte
    #[error("Unexpected sync byte {0:#04x}")]
    UnexpectedSync(u8),

    /// Reply came from a different device address
    #[error("Unexpected address: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedAddress { expected: u8, actual: u8 },

    /// Reply opcode does not answer the request
    #[error("Unexpected opcode: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedOpcode { expected: u8, actual: u8 },
}

impl ProtocolError {
    /// Create a malformed frame error for a reply of the given length
    pub fn malformed(actual: usize) -> Self {
        Self::MalformedFrame {
            expected: crate::protocol::FRAME_LENGTH,
            actual,
        }
    }
}
