/*!
Configuration management for device connections.
*/

use anyhow::{Context, Result};
use pelcod_protocol::ReplyValidation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub link: LinkConfig,
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a device configuration from a TOML file.
    ///
    /// Missing `[device]` or `[link]` tables and keys fall back to defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read device config {}", path.display()))?;

        let config: ClientConfig = toml::from_str(&content).with_context(|| {
            format!("Invalid [device]/[link] settings in {}", path.display())
        })?;

        Ok(config)
    }

    /// Write the `[device]` and `[link]` tables to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .context("Cannot encode device config as TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write device config {}", path.display()))?;

        Ok(())
    }
}

/// Device address and axis ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Host name or IP address of the positioner
    pub host: String,

    /// UDP port of the positioner
    pub port: u16,

    /// Degrees covered by the full pan step range
    pub max_pan_degrees: u16,

    /// Degrees covered by the full tilt step range
    pub max_tilt_degrees: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6000,
            max_pan_degrees: 360,
            max_tilt_degrees: 135,
        }
    }
}

/// Per-exchange link behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Receive deadline in milliseconds, unset blocks forever
    pub read_timeout_ms: Option<u64>,

    /// Reply checking policy
    pub reply_validation: ReplyValidation,
}

impl LinkConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}
