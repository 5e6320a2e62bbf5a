/*!
Command catalog for the Pelco-DE positioning extension.

Every logical operation maps to a request opcode carried in the command-2
field of a frame. The device answers with its own response opcode, which is
only inspected when strict reply validation is enabled.
*/

use std::fmt;

/// Logical operations understood by a Pelco-DE positioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    GetPanSteps = 0x51,
    GetTiltSteps = 0x53,
    GetPanMaxSteps = 0x55,
    GetTiltMaxSteps = 0x57,
    SetPanSteps = 0x71,
    SetTiltSteps = 0x73,
    GetTemperature = 0x91,
    GetVoltage = 0x9B,
}

impl Command {
    /// All commands in opcode order
    pub const ALL: [Command; 8] = [
        Self::GetPanSteps,
        Self::GetTiltSteps,
        Self::GetPanMaxSteps,
        Self::GetTiltMaxSteps,
        Self::SetPanSteps,
        Self::SetTiltSteps,
        Self::GetTemperature,
        Self::GetVoltage,
    ];

    /// Look up a command by its request opcode
    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x51 => Some(Self::GetPanSteps),
            0x53 => Some(Self::GetTiltSteps),
            0x55 => Some(Self::GetPanMaxSteps),
            0x57 => Some(Self::GetTiltMaxSteps),
            0x71 => Some(Self::SetPanSteps),
            0x73 => Some(Self::SetTiltSteps),
            0x91 => Some(Self::GetTemperature),
            0x9B => Some(Self::GetVoltage),
            _ => None,
        }
    }

    /// Request opcode placed in the command-2 field
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Opcode the device uses in its reply to this command
    pub fn response_opcode(self) -> u8 {
        match self {
            Self::GetPanSteps => 0x61,
            Self::GetTiltSteps => 0x63,
            Self::GetPanMaxSteps => 0x65,
            Self::GetTiltMaxSteps => 0x67,
            // Both set commands share one acknowledgement
            Self::SetPanSteps | Self::SetTiltSteps => 0x7C,
            Self::GetTemperature => 0xA1,
            Self::GetVoltage => 0xAB,
        }
    }

    /// Check if this command sends a value to the device
    pub fn carries_value(self) -> bool {
        matches!(self, Self::SetPanSteps | Self::SetTiltSteps)
    }

    /// Short name used in logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetPanSteps => "get_pan_steps",
            Self::GetTiltSteps => "get_tilt_steps",
            Self::GetPanMaxSteps => "get_pan_max_steps",
            Self::GetTiltMaxSteps => "get_tilt_max_steps",
            Self::SetPanSteps => "set_pan_steps",
            Self::SetTiltSteps => "set_tilt_steps",
            Self::GetTemperature => "get_temperature",
            Self::GetVoltage => "get_voltage",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
