//! Native serial port access for the tick-driven pipeline.
//!
//! The driver polls [`SerialTransport::read_available`] once per tick. The
//! port is opened with a 1 ms read timeout, so a quiet link costs at most
//! one millisecond per tick and a timeout is simply "no data" — the timeout
//! period itself throttles retries, no backoff needed.

use std::io::{self, Read};
use std::time::Duration;

use core_types::{SerialConfig, Transport, TransportError};
use log::{info, trace};

const READ_TIMEOUT: Duration = Duration::from_millis(1);
const READ_CHUNK: usize = 4096;

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
    port_name: String,
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port_name", &self.port_name)
            .finish_non_exhaustive()
    }
}

impl SerialTransport {
    /// Open the device described by `config`.
    ///
    /// Failure here is the one transport error worth surfacing: the caller
    /// reports it once and runs degraded (no events, no crash). The port is
    /// released when the transport drops.
    pub fn open(config: &SerialConfig) -> Result<Self, TransportError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| TransportError::Open {
                port: config.port.clone(),
                reason: e.to_string(),
            })?;

        info!("serial opened: {} @ {} baud", config.port, config.baud_rate);
        Ok(Self {
            port,
            port_name: config.port.clone(),
        })
    }
}

impl Transport for SerialTransport {
    fn read_available(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut buf = [0u8; READ_CHUNK];
        match self.port.read(&mut buf) {
            Ok(n) => {
                if n > 0 {
                    trace!("read {} bytes from {}", n, self.port_name);
                }
                Ok(buf[..n].to_vec())
            }
            Err(e) => match classify_read_error(&e) {
                ReadOutcome::NoData => Ok(Vec::new()),
                ReadOutcome::Fail => Err(TransportError::Io(e.to_string())),
            },
        }
    }

    fn is_open(&self) -> bool {
        true
    }

    fn port_name(&self) -> &str {
        &self.port_name
    }
}

enum ReadOutcome {
    /// Timeout or would-block: nothing arrived this tick.
    NoData,
    /// Real I/O fault; the driver logs it and carries on.
    Fail,
}

fn classify_read_error(e: &io::Error) -> ReadOutcome {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
            ReadOutcome::NoData
        }
        _ => ReadOutcome::Fail,
    }
}

/// Enumerate system serial ports, for the CLI's `--list`.
pub fn list_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(_) => Vec::new(),
    }
}
