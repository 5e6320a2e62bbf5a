/*!
Pelco-DE positioner reached over a datagram transport.

Construction queries both maximum step counts and fixes the steps-per-degree
ratio of each axis. After that the device holds no state beyond those ratios
and every call is a single blocking exchange.
*/

use crate::calibration::{Axis, AxisCalibration};
use crate::config::ClientConfig;
use crate::device::PtzDevice;
use crate::error::Result;
use crate::transceiver::Transceiver;
use crate::transport::{Transport, UdpTransport};
use pelcod_protocol::{Command, ReplyValidation};
use tracing::info;

/// Voltage readings are reported in hundredths of a volt
const VOLTAGE_SCALE: f64 = 100.0;

/// Calibrated Pelco-DE device
#[derive(Debug)]
pub struct PelcoDeDevice<T: Transport = UdpTransport> {
    transceiver: Transceiver<T>,
    pan: AxisCalibration,
    tilt: AxisCalibration,
}

impl PelcoDeDevice<UdpTransport> {
    /// Connect with the default 360 degree pan and 135 degree tilt ranges
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Self::connect_with_ranges(
            host,
            port,
            Axis::Pan.default_max_degrees(),
            Axis::Tilt.default_max_degrees(),
        )
    }

    /// Connect with explicit degree ranges for the full step span of each axis
    pub fn connect_with_ranges(
        host: &str,
        port: u16,
        max_pan_degrees: u16,
        max_tilt_degrees: u16,
    ) -> Result<Self> {
        let transport = UdpTransport::open(host, port, None)?;
        Self::with_transport(transport, max_pan_degrees, max_tilt_degrees, ReplyValidation::Lenient)
    }

    /// Connect using a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = UdpTransport::open(
            &config.device.host,
            config.device.port,
            config.link.read_timeout(),
        )?;
        Self::with_transport(
            transport,
            config.device.max_pan_degrees,
            config.device.max_tilt_degrees,
            config.link.reply_validation,
        )
    }
}

impl<T: Transport> PelcoDeDevice<T> {
    /// Calibrate a device reachable through `transport`.
    ///
    /// Issues the pan and tilt max-steps exchanges before returning.
    pub fn with_transport(
        transport: T,
        max_pan_degrees: u16,
        max_tilt_degrees: u16,
        validation: ReplyValidation,
    ) -> Result<Self> {
        let mut transceiver = Transceiver::with_validation(transport, validation);

        let pan_max_steps = transceiver.exchange(Command::GetPanMaxSteps, 0)?;
        let tilt_max_steps = transceiver.exchange(Command::GetTiltMaxSteps, 0)?;

        let pan = AxisCalibration::new(Axis::Pan, pan_max_steps, max_pan_degrees)?;
        let tilt = AxisCalibration::new(Axis::Tilt, tilt_max_steps, max_tilt_degrees)?;

        info!(
            "Calibrated: pan {} steps/degree ({} steps over {}), tilt {} steps/degree ({} steps over {})",
            pan.steps_per_degree(),
            pan_max_steps,
            max_pan_degrees,
            tilt.steps_per_degree(),
            tilt_max_steps,
            max_tilt_degrees,
        );

        Ok(Self {
            transceiver,
            pan,
            tilt,
        })
    }

    /// Calibration fixed at construction for `axis`
    pub fn calibration(&self, axis: Axis) -> &AxisCalibration {
        match axis {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        }
    }

    pub fn transceiver(&self) -> &Transceiver<T> {
        &self.transceiver
    }

    /// Consume the device and return its transport
    pub fn into_transport(self) -> T {
        self.transceiver.into_inner()
    }
}

impl<T: Transport> PtzDevice for PelcoDeDevice<T> {
    fn pan_degrees(&mut self) -> Result<u16> {
        let steps = self.pan_steps()?;
        Ok(self.pan.steps_to_degrees(steps))
    }

    fn set_pan_degrees(&mut self, degrees: u16) -> Result<()> {
        let steps = self.pan.degrees_to_steps(degrees)?;
        self.set_pan_steps(steps)
    }

    fn tilt_degrees(&mut self) -> Result<u16> {
        let steps = self.tilt_steps()?;
        Ok(self.tilt.steps_to_degrees(steps))
    }

    fn set_tilt_degrees(&mut self, degrees: u16) -> Result<()> {
        let steps = self.tilt.degrees_to_steps(degrees)?;
        self.set_tilt_steps(steps)
    }

    fn pan_steps(&mut self) -> Result<u16> {
        self.transceiver.exchange(Command::GetPanSteps, 0)
    }

    fn pan_max_steps(&mut self) -> Result<u16> {
        self.transceiver.exchange(Command::GetPanMaxSteps, 0)
    }

    fn set_pan_steps(&mut self, steps: u16) -> Result<()> {
        // The reply is only an acknowledgement
        self.transceiver.exchange(Command::SetPanSteps, steps)?;
        Ok(())
    }

    fn tilt_steps(&mut self) -> Result<u16> {
        self.transceiver.exchange(Command::GetTiltSteps, 0)
    }

    fn tilt_max_steps(&mut self) -> Result<u16> {
        self.transceiver.exchange(Command::GetTiltMaxSteps, 0)
    }

    fn set_tilt_steps(&mut self, steps: u16) -> Result<()> {
        self.transceiver.exchange(Command::SetTiltSteps, steps)?;
        Ok(())
    }

    fn temperature(&mut self) -> Result<i16> {
        let raw = self.transceiver.exchange(Command::GetTemperature, 0)?;
        Ok(raw as i16)
    }

    fn voltage(&mut self) -> Result<f64> {
        let raw = self.transceiver.exchange(Command::GetVoltage, 0)?;
        Ok(f64::from(raw) / VOLTAGE_SCALE)
    }
}
