/*!
Error types for device operations.
*/

use crate::calibration::Axis;
use pelcod_protocol::ProtocolError;
use thiserror::Error;

/// Common result type used throughout the client library
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Every failure a device operation can surface to its caller
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The device variant does not implement this operation
    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),

    /// Sending or receiving a datagram failed
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Reply could not be decoded or failed validation
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Host name did not resolve to any address
    #[error("Could not resolve {host}:{port}")]
    Resolve { host: String, port: u16 },

    /// Steps per degree would be zero for this axis
    #[error("{axis} calibration failed: {max_steps} max steps over {max_degrees} degrees")]
    Calibration {
        axis: Axis,
        max_steps: u16,
        max_degrees: u16,
    },

    /// Degree target does not fit in the 16-bit step field
    #[error("{axis} target of {degrees} degrees at {steps_per_degree} steps/degree overflows")]
    StepsOverflow {
        axis: Axis,
        degrees: u16,
        steps_per_degree: u16,
    },
}
