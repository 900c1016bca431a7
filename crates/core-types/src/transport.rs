use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to open {port}: {reason}")]
    Open { port: String, reason: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Not connected")]
    NotConnected,
}

/// Serial link parameters. Framing is fixed 8N1; only the device path and
/// baud rate vary across deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Platform device path (`/dev/ttyUSB0`, `/dev/cu.usbmodem...`, `COM3`).
    pub port: String,
    pub baud_rate: u32,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
        }
    }
}

/// A byte producer polled once per driver tick (serial port, mock, replay).
///
/// The tick loop is single-threaded and cooperative, so reads are
/// synchronous: each call returns whatever arrived since the last poll,
/// possibly nothing. A read timeout is "no data this tick", never an error —
/// that mapping is the implementor's responsibility. Errors that do surface
/// are logged by the driver and otherwise treated the same as no data.
pub trait Transport {
    /// Read whatever bytes are currently available. May return empty.
    fn read_available(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Whether the underlying device is open. Gates the read in the driver.
    fn is_open(&self) -> bool;

    /// Device path, for logging.
    fn port_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_display() {
        let err = TransportError::Open {
            port: "/dev/ttyUSB0".into(),
            reason: "Permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to open /dev/ttyUSB0: Permission denied"
        );
    }

    #[test]
    fn test_serial_config_roundtrip() {
        let cfg = SerialConfig::new("/dev/ttyACM0", 9600);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SerialConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
