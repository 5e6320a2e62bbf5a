/*!
# Pelco-DE Client

Blocking client for Pelco-DE pan-tilt positioners reached over UDP.

```no_run
use pelcod_client::{PelcoDeDevice, PtzDevice};

let mut device = PelcoDeDevice::connect("192.168.1.50", 6000)?;
device.set_pan_degrees(90)?;
let tilt = device.tilt_degrees()?;
let volts = device.voltage()?;
println!("tilt at {} degrees, supply {:.2} V", tilt, volts);
# Ok::<(), pelcod_client::DeviceError>(())
```

## Modules

- [`device`] - Capability trait implemented by every positioner variant
- [`pelco_de`] - Calibrated Pelco-DE device
- [`transceiver`] - One request frame out, one reply frame in
- [`transport`] - Datagram transport contract and UDP implementation
- [`calibration`] - Degree and step conversion
- [`config`] - TOML configuration
- [`error`] - Device error types
*/

pub mod calibration;
pub mod config;
pub mod device;
pub mod error;
pub mod pelco_de;
pub mod transceiver;
pub mod transport;

// Re-export commonly used types
pub use calibration::{Axis, AxisCalibration};
pub use config::{ClientConfig, DeviceConfig, LinkConfig};
pub use device::PtzDevice;
pub use error::{DeviceError, Result};
pub use pelco_de::PelcoDeDevice;
pub use transceiver::Transceiver;
pub use transport::{Transport, UdpTransport};

pub use pelcod_protocol::{Command, Frame, ProtocolError, ReplyValidation};
