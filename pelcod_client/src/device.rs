/*!
Capability interface shared by every positioner variant.

Each operation has a default body that fails with
[`DeviceError::NotSupported`], so a variant only implements what its
hardware can do. A device without a temperature sensor, for example, leaves
[`PtzDevice::temperature`] alone and callers get an explicit error instead of
a made-up reading.

All operations take `&mut self`: they talk to the device, and the protocol
cannot tell two overlapping exchanges apart.
*/

use crate::error::{DeviceError, Result};

pub trait PtzDevice {
    /// Current pan position in whole degrees
    fn pan_degrees(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("pan_degrees"))
    }

    /// Move the pan axis to a position in degrees
    fn set_pan_degrees(&mut self, _degrees: u16) -> Result<()> {
        Err(DeviceError::NotSupported("set_pan_degrees"))
    }

    /// Current tilt position in whole degrees
    fn tilt_degrees(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("tilt_degrees"))
    }

    /// Move the tilt axis to a position in degrees
    fn set_tilt_degrees(&mut self, _degrees: u16) -> Result<()> {
        Err(DeviceError::NotSupported("set_tilt_degrees"))
    }

    /// Current pan position in device steps
    fn pan_steps(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("pan_steps"))
    }

    /// Maximum pan position in device steps
    fn pan_max_steps(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("pan_max_steps"))
    }

    /// Move the pan axis to a position in device steps
    fn set_pan_steps(&mut self, _steps: u16) -> Result<()> {
        Err(DeviceError::NotSupported("set_pan_steps"))
    }

    /// Current tilt position in device steps
    fn tilt_steps(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("tilt_steps"))
    }

    /// Maximum tilt position in device steps
    fn tilt_max_steps(&mut self) -> Result<u16> {
        Err(DeviceError::NotSupported("tilt_max_steps"))
    }

    /// Move the tilt axis to a position in device steps
    fn set_tilt_steps(&mut self, _steps: u16) -> Result<()> {
        Err(DeviceError::NotSupported("set_tilt_steps"))
    }

    /// Device temperature
    fn temperature(&mut self) -> Result<i16> {
        Err(DeviceError::NotSupported("temperature"))
    }

    /// Supply voltage in volts
    fn voltage(&mut self) -> Result<f64> {
        Err(DeviceError::NotSupported("voltage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Variant that only knows its pan position
    struct PanOnly {
        steps: u16,
    }

    impl PtzDevice for PanOnly {
        fn pan_steps(&mut self) -> Result<u16> {
            Ok(self.steps)
        }

        fn set_pan_steps(&mut self, steps: u16) -> Result<()> {
            self.steps = steps;
            Ok(())
        }
    }

    #[test]
    fn test_overridden_operations_work() {
        let mut device = PanOnly { steps: 10 };
        device.set_pan_steps(42).unwrap();
        assert_eq!(device.pan_steps().unwrap(), 42);
    }

    #[test]
    fn test_default_operations_fail() {
        let mut device: Box<dyn PtzDevice> = Box::new(PanOnly { steps: 0 });

        assert!(matches!(device.temperature(), Err(DeviceError::NotSupported("temperature"))));
        assert!(matches!(device.voltage(), Err(DeviceError::NotSupported("voltage"))));
        assert!(matches!(device.tilt_steps(), Err(DeviceError::NotSupported("tilt_steps"))));
        assert!(matches!(
            device.set_tilt_degrees(10),
            Err(DeviceError::NotSupported("set_tilt_degrees"))
        ));
        assert!(matches!(device.pan_degrees(), Err(DeviceError::NotSupported("pan_degrees"))));
        assert!(matches!(device.pan_max_steps(), Err(DeviceError::NotSupported(_))));
    }

    #[test]
    fn test_not_supported_message() {
        let err = DeviceError::NotSupported("voltage");
        assert_eq!(err.to_string(), "Operation not supported: voltage");
    }
}
