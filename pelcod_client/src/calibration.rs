/*!
Degree and step conversion.

Each axis is calibrated once from the maximum step count the device reports
and the degree range the caller says it covers. The resulting steps per
degree ratio is an integer, so conversions truncate: sending a degree value
and reading it back is not guaranteed to return the same number.
*/

use crate::error::{DeviceError, Result};
use std::fmt;
use std::num::NonZeroU16;

/// Positioner axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Pan,
    Tilt,
}

impl Axis {
    /// Degree range assumed when the caller does not give one
    pub fn default_max_degrees(self) -> u16 {
        match self {
            Self::Pan => 360,
            Self::Tilt => 135,
        }
    }

    /// Modulus applied to degree targets before conversion
    pub fn wrap_degrees(self) -> u16 {
        match self {
            Self::Pan => 360,
            Self::Tilt => 135,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pan => f.write_str("pan"),
            Self::Tilt => f.write_str("tilt"),
        }
    }
}

/// Fixed steps-per-degree ratio for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCalibration {
    axis: Axis,
    max_steps: u16,
    max_degrees: u16,
    steps_per_degree: NonZeroU16,
}

impl AxisCalibration {
    /// Derive the ratio as `max_steps / max_degrees`, truncating.
    ///
    /// Fails when `max_degrees` is zero or the ratio truncates to zero.
    pub fn new(axis: Axis, max_steps: u16, max_degrees: u16) -> Result<Self> {
        let ratio = max_steps.checked_div(max_degrees).unwrap_or(0);
        let steps_per_degree = NonZeroU16::new(ratio).ok_or(DeviceError::Calibration {
            axis,
            max_steps,
            max_degrees,
        })?;

        Ok(Self {
            axis,
            max_steps,
            max_degrees,
            steps_per_degree,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Maximum step count reported by the device
    pub fn max_steps(&self) -> u16 {
        self.max_steps
    }

    pub fn max_degrees(&self) -> u16 {
        self.max_degrees
    }

    pub fn steps_per_degree(&self) -> u16 {
        self.steps_per_degree.get()
    }

    /// Convert a device step count to whole degrees
    pub fn steps_to_degrees(&self, steps: u16) -> u16 {
        steps / self.steps_per_degree
    }

    /// Wrap `degrees` into the axis range and convert to steps.
    ///
    /// Fails with [`DeviceError::StepsOverflow`] when the step count does not
    /// fit in 16 bits.
    pub fn degrees_to_steps(&self, degrees: u16) -> Result<u16> {
        let wrapped = degrees % self.axis.wrap_degrees();
        wrapped
            .checked_mul(self.steps_per_degree.get())
            .ok_or(DeviceError::StepsOverflow {
                axis: self.axis,
                degrees: wrapped,
                steps_per_degree: self.steps_per_degree.get(),
            })
    }
}
