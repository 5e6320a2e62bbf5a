/*!
# Pelco-D Protocol Primitives

Wire-level types for commanding Pelco-D/Pelco-DE pan-tilt positioners.
Nothing in this crate performs I/O.

## Core Types

- [`Frame`] - Seven-byte command/reply frame
- [`Command`] - Catalog of positioning and telemetry commands
- [`ReplyValidation`] - How strictly replies are checked

## Modules

- [`frame`] - Frame encoding, decoding and checksum
- [`command`] - Command to opcode mapping
- [`error`] - Protocol error types
*/

pub mod command;
pub mod error;
pub mod frame;

// Re-export commonly used types
pub use command::Command;
pub use error::{ProtocolError, Result};
pub use frame::{checksum, decode, encode, Frame, ReplyValidation};

/// Version information for the protocol library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol constants
pub mod protocol {
    /// Size of a frame in bytes
    pub const FRAME_LENGTH: usize = 7;

    /// Synchronization byte opening every frame
    pub const SYNC_BYTE: u8 = 0xFF;

    /// Device address used by the positioning extension
    pub const DEFAULT_ADDRESS: u8 = 0x01;
}
